//! Editing support for sample filter expressions.
//!
//! Filter expressions select samples by their scores, e.g.
//! `accuracy > 0.5 and grade in ("A", "B")`. This crate is the language front
//! end used by editors: it tokenizes expressions, proposes completions at a
//! cursor, and turns evaluator errors into diagnostics. It does not evaluate
//! expressions.
//!
//! # Modules
//!
//! - [`lexer`] - Tokenizer producing typed tokens with byte spans
//! - [`grammar`] - Keyword and function tables
//! - [`catalog`] - The scores an expression can reference
//! - [`completion`] - Context-sensitive completion engine
//! - [`diagnostics`] - Evaluator error to diagnostic mapping
//!
//! # Example
//!
//! ```
//! use sample_filter_lang::{complete, tokenize, FieldCatalog, FieldDescriptor, ScoreType};
//!
//! let tokens = tokenize("grade not in (\"C\")");
//! assert_eq!(tokens[1].text, "not in");
//!
//! let catalog = FieldCatalog::new(vec![
//!     FieldDescriptor::new("grade", ScoreType::Categorical).with_categories(["\"A\"", "\"B\""]),
//! ])
//! .unwrap();
//!
//! let result = complete("grade == ", 9, &catalog, false).unwrap();
//! assert_eq!(result.suggested_labels(), vec!["\"A\"", "\"B\""]);
//! ```

pub mod catalog;
pub mod completion;
pub mod diagnostics;
mod error;
pub mod grammar;
pub mod lexer;

pub use catalog::{FieldCatalog, FieldDescriptor, ScoreType};
pub use completion::{
    complete, AppliedCompletion, Completion, CompletionContext, CompletionEngine, CompletionKind,
    CompletionResult, CompletionSection,
};
pub use diagnostics::{to_diagnostics, Diagnostic, EvaluationError, Severity};
pub use error::{CatalogError, CatalogResult};
pub use grammar::{Arity, FunctionInfo, Grammar, Keyword, Operator};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
