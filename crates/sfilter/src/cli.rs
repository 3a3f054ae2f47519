//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the sfilter CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// sfilter - Tokenize, complete and diagnose sample filter expressions
#[derive(Parser, Debug)]
#[command(name = "sfilter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Field catalog JSON file (default: from config)
    #[arg(long, global = true, env = "SFILTER_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split an expression into tokens
    #[command(alias = "t")]
    Tokenize {
        /// Filter expression
        expression: String,
    },

    /// Suggest completions at a cursor position
    #[command(alias = "c")]
    Complete {
        /// Filter expression
        expression: String,

        /// Byte offset of the cursor (default: end of expression)
        #[arg(long)]
        cursor: Option<usize>,

        /// Treat the request as explicitly triggered
        #[arg(short, long)]
        explicit: bool,

        /// Apply the option with this label and print the new expression
        #[arg(long)]
        apply: Option<String>,
    },

    /// Turn an evaluator error into diagnostics
    #[command(alias = "d")]
    Diagnose {
        /// Filter expression the error refers to
        expression: String,

        /// Evaluator error JSON file, or "-" for stdin (default: no error)
        #[arg(short, long)]
        error: Option<String>,
    },

    /// List keywords, functions and relations
    Functions,

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Supported shells for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Show config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tokenize() {
        let cli = Cli::try_parse_from(["sfilter", "tokenize", "accuracy > 0.5"]).unwrap();
        if let Some(Commands::Tokenize { expression }) = cli.command {
            assert_eq!(expression, "accuracy > 0.5");
        } else {
            panic!("Expected Tokenize command");
        }
    }

    #[test]
    fn test_parse_complete_with_options() {
        let cli = Cli::try_parse_from([
            "sfilter",
            "complete",
            "grade == ",
            "--cursor",
            "9",
            "--explicit",
            "--apply",
            "A",
        ])
        .unwrap();
        if let Some(Commands::Complete {
            expression,
            cursor,
            explicit,
            apply,
        }) = cli.command
        {
            assert_eq!(expression, "grade == ");
            assert_eq!(cursor, Some(9));
            assert!(explicit);
            assert_eq!(apply.as_deref(), Some("A"));
        } else {
            panic!("Expected Complete command");
        }
    }

    #[test]
    fn test_parse_complete_alias() {
        let cli = Cli::try_parse_from(["sfilter", "c", "acc"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Complete { .. })));
    }

    #[test]
    fn test_parse_diagnose_stdin() {
        let cli = Cli::try_parse_from(["sfilter", "diagnose", "x", "--error", "-"]).unwrap();
        if let Some(Commands::Diagnose { error, .. }) = cli.command {
            assert_eq!(error.as_deref(), Some("-"));
        } else {
            panic!("Expected Diagnose command");
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sfilter",
            "functions",
            "--json",
            "--no-color",
            "--catalog",
            "fields.json",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.no_color);
        assert_eq!(cli.catalog, Some(PathBuf::from("fields.json")));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["sfilter", "-v", "-q", "functions"]).is_err());
    }

    #[test]
    fn test_parse_config_set() {
        let cli =
            Cli::try_parse_from(["sfilter", "config", "set", "output.color", "false"]).unwrap();
        if let Some(Commands::Config {
            command: Some(ConfigCommands::Set { key, value }),
        }) = cli.command
        {
            assert_eq!(key, "output.color");
            assert_eq!(value, "false");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn test_parse_completions() {
        let cli = Cli::try_parse_from(["sfilter", "completions", "zsh"]).unwrap();
        if let Some(Commands::Completions { shell }) = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }
}
