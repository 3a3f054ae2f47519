//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split by whether they need a field catalog: the catalog is only
//! resolved and loaded for those that do.

use sample_filter_lang::FieldCatalog;

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without a field catalog.
pub trait StandaloneCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that complete against a field catalog.
pub trait CatalogCommand {
    /// Execute the command with the loaded catalog.
    fn execute(&self, ctx: &CommandContext, catalog: &FieldCatalog) -> Result<()>;
}

/// Commands that don't need a catalog.
pub enum StandaloneDispatch<'a> {
    Tokenize { expression: &'a str },
    Diagnose {
        expression: &'a str,
        error: &'a Option<String>,
    },
    Functions,
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> StandaloneDispatch<'a> {
    /// Try to create a standalone dispatch from the CLI command.
    /// Returns None if the command needs a catalog.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Tokenize { expression }) => Some(Self::Tokenize {
                expression: expression.as_str(),
            }),
            Some(Commands::Diagnose { expression, error }) => {
                Some(Self::Diagnose {
                    expression: expression.as_str(),
                    error,
                })
            }
            Some(Commands::Functions) => Some(Self::Functions),
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            Some(Commands::Complete { .. }) => None,
        }
    }
}

impl StandaloneCommand for StandaloneDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Tokenize { expression } => {
                let opts = commands::tokenize::TokenizeOptions {
                    expression: expression.to_string(),
                };
                commands::tokenize::execute(ctx, &opts)
            }
            Self::Diagnose { expression, error } => {
                let opts = commands::diagnose::DiagnoseOptions {
                    expression: expression.to_string(),
                    error: (*error).clone(),
                };
                commands::diagnose::execute(ctx, &opts)
            }
            Self::Functions => commands::functions::execute(ctx),
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("sfilter - sample filter expression tools");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that need a catalog.
pub enum CatalogDispatch<'a> {
    Complete {
        expression: &'a str,
        cursor: Option<usize>,
        explicit: bool,
        apply: &'a Option<String>,
    },
}

impl<'a> CatalogDispatch<'a> {
    /// Create a catalog dispatch from the CLI command.
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Complete {
                expression,
                cursor,
                explicit,
                apply,
            }) => Some(Self::Complete {
                expression: expression.as_str(),
                cursor: *cursor,
                explicit: *explicit,
                apply,
            }),
            _ => None,
        }
    }
}

impl CatalogCommand for CatalogDispatch<'_> {
    fn execute(&self, ctx: &CommandContext, catalog: &FieldCatalog) -> Result<()> {
        match self {
            Self::Complete {
                expression,
                cursor,
                explicit,
                apply,
            } => {
                let opts = commands::complete::CompleteOptions {
                    expression: expression.to_string(),
                    cursor: *cursor,
                    explicit: *explicit,
                    apply: (*apply).clone(),
                };
                commands::complete::execute(ctx, catalog, &opts)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["sfilter"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_complete_needs_catalog() {
        let cli = parse(&["complete", "acc"]);
        assert!(StandaloneDispatch::try_from_cli(&cli).is_none());
        assert!(matches!(
            CatalogDispatch::from_cli(&cli),
            Some(CatalogDispatch::Complete {
                expression: "acc",
                cursor: None,
                explicit: false,
                ..
            })
        ));
    }

    #[test]
    fn test_standalone_commands() {
        for args in [
            vec!["tokenize", "x"],
            vec!["diagnose", "x"],
            vec!["functions"],
            vec!["config", "path"],
            vec!["completions", "bash"],
            vec![],
        ] {
            let cli = parse(&args);
            assert!(StandaloneDispatch::try_from_cli(&cli).is_some(), "{args:?}");
            assert!(CatalogDispatch::from_cli(&cli).is_none(), "{args:?}");
        }
    }

    #[test]
    fn test_no_command_is_help() {
        let cli = parse(&[]);
        assert!(matches!(
            StandaloneDispatch::try_from_cli(&cli),
            Some(StandaloneDispatch::Help)
        ));
    }
}
