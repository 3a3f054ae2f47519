//! Context-sensitive completion for filter expressions.
//!
//! The engine looks at a few tokens before the cursor and picks the first
//! matching rule from a fixed cascade (see [`CompletionContext`]). It is a
//! heuristic: when the context is ambiguous it offers nothing
//! unless the user asked explicitly, in which case it falls back to the
//! generic option set.
//!
//! # Example
//!
//! ```
//! use sample_filter_lang::{complete, FieldCatalog, FieldDescriptor, ScoreType};
//!
//! let catalog = FieldCatalog::new(vec![FieldDescriptor::new("accuracy", ScoreType::Numeric)])
//!     .unwrap();
//!
//! let result = complete("accuracy ", 9, &catalog, false).unwrap();
//! assert_eq!(result.suggested_labels(), vec!["<", "<=", ">", ">=", "==", "!="]);
//! ```

mod context;
mod options;

pub use context::CompletionContext;
pub use options::{
    AppliedCompletion, Completion, CompletionKind, CompletionResult, CompletionSection,
};

use crate::catalog::{FieldCatalog, FieldDescriptor, ScoreType};
use crate::grammar::Grammar;
use crate::lexer::{clamp_to_char_boundary, Lexer};

use context::{analyze, Lookback};
use options::{assemble, default_completions, Presentation};

/// Relations offered after a numeric field, in display order.
const NUMERIC_RELATIONS: &[&str] = &["<", "<=", ">", ">=", "==", "!="];

/// Relations offered after a categorical or pass/fail field.
const EQUALITY_RELATIONS: &[&str] = &["==", "!=", "in", "not in"];

/// Connectors offered after a complete condition.
const LOGICAL_CONNECTORS: &[&str] = &["and", "or"];

/// Completion engine bound to a set of grammar tables.
#[derive(Debug, Clone, Copy)]
pub struct CompletionEngine<'g> {
    grammar: &'g Grammar,
}

impl Default for CompletionEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionEngine<'static> {
    /// Creates an engine for the standard grammar.
    pub fn new() -> Self {
        Self::with_grammar(Grammar::standard())
    }
}

impl<'g> CompletionEngine<'g> {
    pub fn with_grammar(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    /// Proposes completions for `input` at byte offset `cursor`.
    ///
    /// Returns `None` when nothing fits and the request was not explicitly
    /// triggered. A cursor past the end is clamped to the input length.
    pub fn complete(
        &self,
        input: &str,
        cursor: usize,
        catalog: &FieldCatalog,
        explicitly_triggered: bool,
    ) -> Option<CompletionResult> {
        let cursor = clamp_to_char_boundary(input, cursor);
        let tokens = Lexer::with_grammar(&input[..cursor], self.grammar).tokenize();
        let lookback = Lookback::new(&tokens, cursor);
        let from = lookback.completion_start(cursor);
        let context = analyze(&lookback, catalog);

        tracing::debug!(
            cursor,
            from,
            context = context.name(),
            explicit = explicitly_triggered,
            "resolved completion context"
        );

        let options = self.options_for(&context, catalog, explicitly_triggered)?;
        if options.is_empty() && !explicitly_triggered {
            return None;
        }
        Some(CompletionResult { from, options })
    }

    /// Resolves the context only, without building options.
    pub fn context<'c>(
        &self,
        input: &str,
        cursor: usize,
        catalog: &'c FieldCatalog,
    ) -> CompletionContext<'c> {
        let cursor = clamp_to_char_boundary(input, cursor);
        let tokens = Lexer::with_grammar(&input[..cursor], self.grammar).tokenize();
        analyze(&Lookback::new(&tokens, cursor), catalog)
    }

    fn options_for(
        &self,
        context: &CompletionContext<'_>,
        catalog: &FieldCatalog,
        explicit: bool,
    ) -> Option<Vec<Completion>> {
        let options = match context {
            CompletionContext::StartOfExpression => {
                self.with_defaults(self.expression_starts(catalog), catalog, Presentation::new())
            }
            CompletionContext::MemberAccess { scorer } => {
                let members = catalog
                    .members_of(scorer)
                    .map(|(member, field)| {
                        let option = Completion::text(member, CompletionKind::Member)
                            .with_info(field.tooltip.as_deref());
                        spaced_unless_boolean(option, field)
                    })
                    .collect();
                assemble(members, Vec::new(), Presentation::new().without_default())
            }
            CompletionContext::MathArgument => {
                let fields = catalog.iter().map(Completion::field).collect();
                self.with_defaults(fields, catalog, Presentation::new())
            }
            CompletionContext::AfterField(field) => self.with_defaults(
                self.relations_for(field),
                catalog,
                Presentation::new().enforce_order().auto_space_after(),
            ),
            CompletionContext::CategoryValue(field) => {
                let values = field
                    .categories()
                    .unwrap_or_default()
                    .iter()
                    .map(|value| Completion::text(value, CompletionKind::Value))
                    .collect();
                self.with_defaults(
                    values,
                    catalog,
                    Presentation::new().enforce_order().auto_space_after(),
                )
            }
            CompletionContext::ChainComparison => {
                let fields = catalog.iter().map(Completion::field).collect();
                self.with_defaults(fields, catalog, Presentation::new().auto_space_after())
            }
            CompletionContext::AfterComparison => self.with_defaults(
                self.connectors(),
                catalog,
                Presentation::new().enforce_order().auto_space_after(),
            ),
            CompletionContext::SearchArgument
            | CompletionContext::AfterGroup
            | CompletionContext::ScalarValue(_)
            | CompletionContext::Unknown => return self.no_guess(catalog, explicit),
        };
        Some(options)
    }

    /// Field names and sample functions that can begin a condition.
    fn expression_starts(&self, catalog: &FieldCatalog) -> Vec<Completion> {
        let fields = catalog
            .iter()
            .map(|field| spaced_unless_boolean(Completion::field(field), field));
        let sample = self
            .grammar
            .sample_functions()
            .iter()
            .map(Completion::sample_function);
        fields.chain(sample).collect()
    }

    fn relations_for(&self, field: &FieldDescriptor) -> Vec<Completion> {
        let symbols: Vec<&str> = match field.score_type {
            ScoreType::PassFail | ScoreType::Categorical => EQUALITY_RELATIONS.to_vec(),
            ScoreType::Numeric => NUMERIC_RELATIONS.to_vec(),
            ScoreType::Other => {
                let mut symbols = NUMERIC_RELATIONS.to_vec();
                symbols.push("~=");
                symbols
            }
            ScoreType::Boolean => return self.connectors(),
        };
        symbols
            .into_iter()
            .filter_map(|symbol| self.operator(symbol))
            .collect()
    }

    fn connectors(&self) -> Vec<Completion> {
        LOGICAL_CONNECTORS
            .iter()
            .filter_map(|name| self.operator(name))
            .collect()
    }

    /// Builds the option for a relation symbol or keyword operator.
    fn operator(&self, name: &str) -> Option<Completion> {
        if let Some(keyword) = self.grammar.keyword(name) {
            return Some(Completion::keyword(keyword));
        }
        self.grammar.relation(name).map(Completion::relation)
    }

    fn with_defaults(
        &self,
        priority: Vec<Completion>,
        catalog: &FieldCatalog,
        presentation: Presentation,
    ) -> Vec<Completion> {
        assemble(
            priority,
            default_completions(self.grammar, catalog),
            presentation,
        )
    }

    /// Generic options on explicit request, nothing otherwise.
    fn no_guess(&self, catalog: &FieldCatalog, explicit: bool) -> Option<Vec<Completion>> {
        explicit.then(|| self.with_defaults(Vec::new(), catalog, Presentation::new()))
    }
}

/// Boolean fields are used bare; others need a relation next.
fn spaced_unless_boolean(option: Completion, field: &FieldDescriptor) -> Completion {
    if field.is_boolean() {
        option
    } else {
        option.with_trailing_space()
    }
}

/// Proposes completions using the standard grammar.
pub fn complete(
    input: &str,
    cursor: usize,
    catalog: &FieldCatalog,
    explicitly_triggered: bool,
) -> Option<CompletionResult> {
    CompletionEngine::new().complete(input, cursor, catalog, explicitly_triggered)
}
