//! Logging setup for the sfilter CLI.
//!
//! Logs go to stderr so they never mix with command output on stdout.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Cli;

/// Level used when neither a flag nor `RUST_LOG` chooses one.
const DEFAULT_LEVEL: &str = "warn";

/// Builds the stderr filter: `--verbose` / `--quiet` win over `RUST_LOG`.
fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    match (verbose, quiet) {
        (true, _) => EnvFilter::new("debug"),
        (_, true) => EnvFilter::new("error"),
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logger(cli: &Cli) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .with_filter(build_filter(cli.verbose, cli.quiet));

    let _ = tracing_subscriber::registry().with(layer).try_init();
}
