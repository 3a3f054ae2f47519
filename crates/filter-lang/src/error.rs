//! Error types for loading field catalogs.

use thiserror::Error;

/// A specialized Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while building a field catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog document is not valid JSON or does not match the schema.
    #[error("invalid catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// Two descriptors share the same canonical name.
    #[error("duplicate field name: {name}")]
    DuplicateField {
        /// The repeated canonical name.
        name: String,
    },

    /// A descriptor has an empty canonical name.
    #[error("field name is empty")]
    EmptyName,
}

impl CatalogError {
    /// Creates a duplicate field error.
    pub fn duplicate_field(name: impl Into<String>) -> Self {
        CatalogError::DuplicateField { name: name.into() }
    }
}
