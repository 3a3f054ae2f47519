use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod logging;
mod output;

use cli::Cli;
use commands::config::{load_config, load_config_or_default};
use commands::{resolve_catalog, CommandContext, CommandError};
use dispatch::{CatalogCommand, CatalogDispatch, StandaloneCommand, StandaloneDispatch};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(json) => eprintln!("{json}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    if let Some(dispatch) = StandaloneDispatch::try_from_cli(cli) {
        // Config subcommands that need the file load it themselves
        let ctx = CommandContext::from_cli(cli, &load_config_or_default());
        return dispatch.execute(&ctx);
    }

    // Only catalog commands remain; load it once for them
    if let Some(dispatch) = CatalogDispatch::from_cli(cli) {
        let config = load_config()?;
        let ctx = CommandContext::from_cli(cli, &config);
        let catalog = resolve_catalog(cli, &config)?;
        return dispatch.execute(&ctx, &catalog);
    }

    Ok(())
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Catalog(_) => "CATALOG_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
        CommandError::InvalidCursor { .. } => "INVALID_CURSOR",
        CommandError::UnknownOption(_) => "UNKNOWN_OPTION",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Config(_) => ExitCode::from(5),
        CommandError::Catalog(_) => ExitCode::from(4),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::InvalidCursor { .. } => ExitCode::from(2),
        CommandError::Json(_) | CommandError::UnknownOption(_) => ExitCode::from(1),
    }
}
