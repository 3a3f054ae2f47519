//! Completion options and how a result list is assembled.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{FieldCatalog, FieldDescriptor};
use crate::grammar::{FunctionInfo, Grammar, Keyword, Operator};
use crate::lexer::clamp_to_char_boundary;

/// Boost given to the demoted default set; below every priority boost.
const DEMOTED_BOOST: i32 = -99;

/// The kind of a completion item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionKind {
    Keyword,
    MathFunction,
    SampleFunction,
    Field,
    Member,
    Relation,
    Value,
}

impl CompletionKind {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionKind::Keyword => "keyword",
            CompletionKind::MathFunction => "math_function",
            CompletionKind::SampleFunction => "sample_function",
            CompletionKind::Field => "field",
            CompletionKind::Member => "member",
            CompletionKind::Relation => "relation",
            CompletionKind::Value => "value",
        }
    }
}

/// Where an option is shown relative to the separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionSection {
    /// Context-specific suggestions, shown first.
    Suggested,
    /// The generic set, shown beneath a separator.
    More,
}

/// A single completion option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub label: String,
    pub kind: CompletionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Ranking bias; higher sorts earlier.
    pub boost: i32,
    /// Text inserted when the option is accepted.
    pub apply: String,
    /// Inserts `name()` and leaves the cursor between the parentheses.
    pub call: bool,
    pub section: CompletionSection,
}

/// A document after a completion has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedCompletion {
    pub text: String,
    pub cursor: usize,
}

impl Completion {
    /// An option inserted verbatim.
    pub fn text(label: impl Into<String>, kind: CompletionKind) -> Self {
        let label = label.into();
        Self {
            apply: label.clone(),
            label,
            kind,
            info: None,
            boost: 0,
            call: false,
            section: CompletionSection::Suggested,
        }
    }

    /// An option that inserts a function call.
    pub fn call(name: impl Into<String>, kind: CompletionKind) -> Self {
        let label = name.into();
        Self {
            apply: format!("{label}()"),
            label,
            kind,
            info: None,
            boost: 0,
            call: true,
            section: CompletionSection::Suggested,
        }
    }

    pub fn with_info(mut self, info: Option<impl Into<String>>) -> Self {
        self.info = info.map(Into::into);
        self
    }

    /// Appends a trailing space to verbatim options. Calls are left alone.
    pub fn with_trailing_space(mut self) -> Self {
        if !self.call && !self.apply.ends_with(' ') {
            self.apply.push(' ');
        }
        self
    }

    /// Replaces `input[from..cursor]` with this option.
    ///
    /// The returned cursor sits after the inserted text, or between the
    /// parentheses of a call.
    pub fn apply_to(&self, input: &str, from: usize, cursor: usize) -> AppliedCompletion {
        let cursor = clamp_to_char_boundary(input, cursor);
        let from = clamp_to_char_boundary(input, from.min(cursor));

        let mut text = String::with_capacity(input.len() + self.apply.len());
        text.push_str(&input[..from]);
        text.push_str(&self.apply);
        text.push_str(&input[cursor..]);

        let mut new_cursor = from + self.apply.len();
        if self.call && self.apply.ends_with(')') {
            // Step back over ")"
            new_cursor -= 1;
        }

        AppliedCompletion {
            text,
            cursor: new_cursor,
        }
    }

    pub(crate) fn keyword(keyword: &Keyword) -> Self {
        Self::text(keyword.name, CompletionKind::Keyword).with_info(Some(keyword.description))
    }

    pub(crate) fn relation(operator: &Operator) -> Self {
        Self::text(operator.symbol, CompletionKind::Relation).with_info(Some(operator.description))
    }

    pub(crate) fn math_function(function: &FunctionInfo) -> Self {
        Self::call(function.name, CompletionKind::MathFunction)
            .with_info(Some(function.description))
    }

    pub(crate) fn sample_function(function: &FunctionInfo) -> Self {
        Self::call(function.name, CompletionKind::SampleFunction)
            .with_info(Some(function.description))
    }

    pub(crate) fn field(field: &FieldDescriptor) -> Self {
        Self::text(&field.canonical_name, CompletionKind::Field).with_info(field.tooltip.as_deref())
    }
}

/// The outcome of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionResult {
    /// Offset from which the accepted option replaces text through the cursor.
    pub from: usize,
    pub options: Vec<Completion>,
}

impl CompletionResult {
    /// Finds an option by label.
    pub fn option(&self, label: &str) -> Option<&Completion> {
        self.options.iter().find(|o| o.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }

    /// Labels of the context-specific options only.
    pub fn suggested_labels(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| o.section == CompletionSection::Suggested)
            .map(|o| o.label.as_str())
            .collect()
    }
}

/// Per-call-site presentation of a priority set.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Presentation {
    /// Boosts strictly decrease in the given order.
    pub enforce_order: bool,
    /// Verbatim options get a trailing space.
    pub auto_space_after: bool,
    /// Append the demoted default set.
    pub include_default: bool,
}

impl Presentation {
    pub const fn new() -> Self {
        Self {
            enforce_order: false,
            auto_space_after: false,
            include_default: true,
        }
    }

    pub const fn enforce_order(mut self) -> Self {
        self.enforce_order = true;
        self
    }

    pub const fn auto_space_after(mut self) -> Self {
        self.auto_space_after = true;
        self
    }

    pub const fn without_default(mut self) -> Self {
        self.include_default = false;
        self
    }
}

/// The generic option set: keywords, functions and every field name.
pub(crate) fn default_completions(grammar: &Grammar, catalog: &FieldCatalog) -> Vec<Completion> {
    let keywords = grammar.keywords().iter().map(Completion::keyword);
    let math = grammar.math_functions().iter().map(Completion::math_function);
    let sample = grammar
        .sample_functions()
        .iter()
        .map(Completion::sample_function);
    let fields = catalog.iter().map(Completion::field);
    keywords.chain(math).chain(sample).chain(fields).collect()
}

/// Orders and decorates `priority`, then appends the default set beneath it.
pub(crate) fn assemble(
    priority: Vec<Completion>,
    defaults: Vec<Completion>,
    presentation: Presentation,
) -> Vec<Completion> {
    let count = priority.len();
    let decorate = |option: Completion| {
        if presentation.auto_space_after {
            option.with_trailing_space()
        } else {
            option
        }
    };

    let labels: HashSet<String> = priority.iter().map(|o| o.label.clone()).collect();
    let mut options: Vec<Completion> = priority
        .into_iter()
        .enumerate()
        .map(|(index, option)| {
            let mut option = decorate(option);
            if presentation.enforce_order {
                option.boost = (count - index) as i32;
            }
            option.section = CompletionSection::Suggested;
            option
        })
        .collect();

    if presentation.include_default {
        let demote = count > 0;
        options.extend(
            defaults
                .into_iter()
                .filter(|o| !labels.contains(&o.label))
                .map(|option| {
                    let mut option = decorate(option);
                    if demote {
                        option.boost = DEMOTED_BOOST;
                        option.section = CompletionSection::More;
                    }
                    option
                }),
        );
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_apply_places_cursor_inside_parens() {
        let option = Completion::call("abs", CompletionKind::MathFunction);
        let applied = option.apply_to("ab", 0, 2);
        assert_eq!(applied.text, "abs()");
        assert_eq!(applied.cursor, 4);
    }

    #[test]
    fn test_text_apply_replaces_prefix() {
        let option = Completion::text("accuracy", CompletionKind::Field).with_trailing_space();
        let applied = option.apply_to("acc > 1", 0, 3);
        assert_eq!(applied.text, "accuracy  > 1");
        assert_eq!(applied.cursor, 9);
    }

    #[test]
    fn test_trailing_space_skips_calls() {
        let option = Completion::call("min", CompletionKind::MathFunction).with_trailing_space();
        assert_eq!(option.apply, "min()");
        let option = Completion::text("and", CompletionKind::Keyword)
            .with_trailing_space()
            .with_trailing_space();
        assert_eq!(option.apply, "and ");
    }

    #[test]
    fn test_assemble_enforce_order() {
        let priority = vec![
            Completion::text("<", CompletionKind::Relation),
            Completion::text("<=", CompletionKind::Relation),
            Completion::text(">", CompletionKind::Relation),
        ];
        let options = assemble(
            priority,
            vec![],
            Presentation::new().enforce_order().auto_space_after(),
        );
        let boosts: Vec<i32> = options.iter().map(|o| o.boost).collect();
        assert_eq!(boosts, vec![3, 2, 1]);
        assert!(options.iter().all(|o| o.apply.ends_with(' ')));
    }

    #[test]
    fn test_assemble_demotes_and_dedupes_defaults() {
        let priority = vec![Completion::text("and", CompletionKind::Keyword)];
        let defaults = vec![
            Completion::text("and", CompletionKind::Keyword),
            Completion::text("or", CompletionKind::Keyword),
        ];
        let options = assemble(priority, defaults, Presentation::new());
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].section, CompletionSection::Suggested);
        assert_eq!(options[1].label, "or");
        assert_eq!(options[1].section, CompletionSection::More);
        assert!(options[1].boost < options[0].boost);
    }

    #[test]
    fn test_assemble_defaults_alone_are_not_demoted() {
        let defaults = vec![Completion::text("or", CompletionKind::Keyword)];
        let options = assemble(vec![], defaults, Presentation::new());
        assert_eq!(options[0].section, CompletionSection::Suggested);
        assert_eq!(options[0].boost, 0);
    }
}
