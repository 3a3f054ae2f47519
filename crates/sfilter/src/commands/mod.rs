//! Command implementations for the sfilter CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod complete;
pub mod completions;
pub mod config;
pub mod diagnose;
pub mod functions;
pub mod tokenize;

use std::fs;
use std::path::{Path, PathBuf};

use sample_filter_lang::{CatalogError, FieldCatalog};

use crate::cli::Cli;
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Field catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Cursor outside the expression or inside a character.
    #[error("cursor {cursor} is not a character boundary of a {len}-byte expression")]
    InvalidCursor { cursor: usize, len: usize },

    /// Requested completion label was not offered.
    #[error("no completion labelled '{0}' at this position")]
    UnknownOption(String),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Treat every completion request as explicitly triggered.
    pub always_explicit: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and the loaded config.
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
            verbose: cli.verbose,
            always_explicit: config.completion.explicit.unwrap_or(false),
        }
    }
}

/// Resolves the catalog path with priority: flag/env > config.
///
/// Returns `None` when neither names a catalog.
pub fn resolve_catalog_path(cli: &Cli, config: &Config) -> Option<PathBuf> {
    // clap already folds SFILTER_CATALOG into the flag
    cli.catalog
        .clone()
        .or_else(|| config.catalog.as_ref().map(PathBuf::from))
}

/// Loads a field catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<FieldCatalog> {
    let content = fs::read_to_string(path)?;
    let catalog = FieldCatalog::from_json(&content)?;
    tracing::debug!(path = %path.display(), fields = catalog.len(), "loaded field catalog");
    Ok(catalog)
}

/// Loads the configured catalog, or an empty one when none is configured.
pub fn resolve_catalog(cli: &Cli, config: &Config) -> Result<FieldCatalog> {
    match resolve_catalog_path(cli, config) {
        Some(path) => load_catalog(&path),
        None => {
            tracing::debug!("no catalog configured, completing from grammar only");
            Ok(FieldCatalog::empty())
        }
    }
}
