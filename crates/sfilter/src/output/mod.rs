//! Output formatting utilities for the sfilter CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by command:
//!
//! - [`tokens`] - Token listing (tokenize)
//! - [`completions`] - Completion results and applied completions (complete)
//! - [`diagnostics`] - Diagnostics with span underlines (diagnose)
//! - [`grammar`] - Keyword, function and relation tables (functions)
//! - [`helpers`] - Common formatting utilities (truncation, spans, kind colors)

mod completions;
mod diagnostics;
mod grammar;
pub mod helpers;
mod tokens;

// Tokens
pub use tokens::{format_tokens_json, format_tokens_table};

// Completions
pub use completions::{
    format_applied_json, format_applied_table, format_completions_json, format_completions_table,
};

// Diagnostics
pub use diagnostics::{format_diagnostics_json, format_diagnostics_table};

// Grammar
pub use grammar::{format_grammar_json, format_grammar_table};
