//! Local context around the cursor, read from a bounded token lookback.
//!
//! No parse tree is built. The few tokens before the cursor are matched
//! against an ordered list of rules and the first rule that applies decides
//! the context.

use crate::catalog::{FieldCatalog, FieldDescriptor};
use crate::lexer::{Token, TokenKind};

/// Tokens that always open a fresh, empty completion context.
const IMMEDIATE_TRIGGERS: &[&str] = &["(", "."];

/// Logical connectors after which a new subexpression starts.
const CONNECTORS: &[&str] = &["and", "or", "not"];

/// Read-only view of the tokens before the cursor.
///
/// `token(0)` is the token being typed (absent when the cursor is not
/// touching one), `token(1)` the one before it, and so on.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Lookback<'t> {
    tokens: &'t [Token],
    in_progress: bool,
}

impl<'t> Lookback<'t> {
    /// `tokens` must come from the text before `cursor`.
    pub fn new(tokens: &'t [Token], cursor: usize) -> Self {
        let in_progress = tokens.last().is_some_and(|last| {
            last.to == cursor && !IMMEDIATE_TRIGGERS.contains(&last.text.as_str())
        });
        Self {
            tokens,
            in_progress,
        }
    }

    pub fn token(&self, k: usize) -> Option<&'t Token> {
        let back = if self.in_progress {
            k
        } else {
            k.checked_sub(1)?
        };
        let index = self.tokens.len().checked_sub(back + 1)?;
        self.tokens.get(index)
    }

    /// Start of the text the accepted completion replaces.
    pub fn completion_start(&self, cursor: usize) -> usize {
        self.token(0).map_or(cursor, |t| t.from)
    }

    /// Rebuilds a dotted name ending at `token(k)`, e.g. `scorer.member`.
    pub fn qualified_name(&self, k: usize) -> Option<String> {
        let last = self.token(k).filter(|t| t.kind == TokenKind::Variable)?;
        let mut parts = vec![last.text.as_str()];
        let mut k = k;
        while let (Some(dot), Some(part)) = (self.token(k + 1), self.token(k + 2)) {
            if !dot.is(".") || part.kind != TokenKind::Variable {
                break;
            }
            parts.push(part.text.as_str());
            k += 2;
        }
        parts.reverse();
        Some(parts.join("."))
    }

    /// Resolves `token(k)` to a catalog field through its dotted name.
    pub fn field<'c>(&self, k: usize, catalog: &'c FieldCatalog) -> Option<&'c FieldDescriptor> {
        self.qualified_name(k).and_then(|name| catalog.get(&name))
    }
}

/// What the cursor position calls for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext<'c> {
    /// Start of the expression, a group, or a subexpression after a connector.
    StartOfExpression,
    /// Right after `scorer.`.
    MemberAccess { scorer: String },
    /// Right after `mathfn(`.
    MathArgument,
    /// Right after `samplefn(`; the argument is a literal search string.
    SearchArgument,
    /// Right after `)`; arithmetic, comparison and connectors all fit.
    AfterGroup,
    /// Right after a known field.
    AfterField(&'c FieldDescriptor),
    /// Right after `field REL` where the field has enumerated categories.
    CategoryValue(&'c FieldDescriptor),
    /// Right after `field REL` where the field has no categories.
    ScalarValue(&'c FieldDescriptor),
    /// Right after `literal REL`: a chain comparison.
    ChainComparison,
    /// Right after `REL literal`: a comparison just completed.
    AfterComparison,
    /// No rule applies.
    Unknown,
}

impl CompletionContext<'_> {
    /// Short name, used in logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            CompletionContext::StartOfExpression => "start_of_expression",
            CompletionContext::MemberAccess { .. } => "member_access",
            CompletionContext::MathArgument => "math_argument",
            CompletionContext::SearchArgument => "search_argument",
            CompletionContext::AfterGroup => "after_group",
            CompletionContext::AfterField(_) => "after_field",
            CompletionContext::CategoryValue(_) => "category_value",
            CompletionContext::ScalarValue(_) => "scalar_value",
            CompletionContext::ChainComparison => "chain_comparison",
            CompletionContext::AfterComparison => "after_comparison",
            CompletionContext::Unknown => "unknown",
        }
    }
}

/// Applies the context rules in order; the first match wins.
pub(crate) fn analyze<'c>(
    lookback: &Lookback<'_>,
    catalog: &'c FieldCatalog,
) -> CompletionContext<'c> {
    let Some(prev) = lookback.token(1) else {
        return CompletionContext::StartOfExpression;
    };

    if prev.is(".") {
        return match lookback.token(2) {
            Some(scorer) => CompletionContext::MemberAccess {
                scorer: scorer.text.clone(),
            },
            None => CompletionContext::Unknown,
        };
    }

    if prev.is("(") {
        return match lookback.token(2).map(|t| t.kind) {
            Some(TokenKind::MathFunction) => CompletionContext::MathArgument,
            Some(TokenKind::SampleFunction) => CompletionContext::SearchArgument,
            _ => CompletionContext::StartOfExpression,
        };
    }

    if prev.is(")") {
        return CompletionContext::AfterGroup;
    }

    if prev.kind == TokenKind::Variable {
        if let Some(field) = lookback.field(1, catalog) {
            return CompletionContext::AfterField(field);
        }
    }

    // `in` and `not in` lex as keywords, so they never reach this rule
    if prev.kind == TokenKind::Relation {
        return match lookback.field(2, catalog) {
            Some(field) if field.categories().is_some() => CompletionContext::CategoryValue(field),
            Some(field) => CompletionContext::ScalarValue(field),
            None => CompletionContext::ChainComparison,
        };
    }

    if prev.kind.is_literal()
        && lookback
            .token(2)
            .is_some_and(|t| t.kind == TokenKind::Relation)
    {
        return CompletionContext::AfterComparison;
    }

    if prev.kind == TokenKind::Keyword && CONNECTORS.contains(&prev.text.as_str()) {
        return CompletionContext::StartOfExpression;
    }

    CompletionContext::Unknown
}
