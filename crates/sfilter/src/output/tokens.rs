//! Token output formatting.

use sample_filter_lang::Token;
use serde::Serialize;

use super::helpers::{format_header, format_span, format_token_kind};

/// Width of the kind column; fits `unterminated_string`.
const KIND_WIDTH: usize = 20;

/// JSON output structure for the tokenize command.
#[derive(Serialize)]
pub struct TokensOutput<'a> {
    pub expression: &'a str,
    pub tokens: &'a [Token],
}

/// Formats tokens as JSON.
pub fn format_tokens_json(expression: &str, tokens: &[Token]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TokensOutput { expression, tokens })
}

/// Formats tokens as a table.
pub fn format_tokens_table(tokens: &[Token], use_colors: bool) -> String {
    if tokens.is_empty() {
        return "No tokens.\n".to_string();
    }

    let mut output = format_header(
        &format!("{:<10} {:<KIND_WIDTH$} {}", "Span", "Kind", "Text"),
        use_colors,
    );

    for token in tokens {
        output.push_str(&format!(
            "{:<10} {} {}\n",
            format_span(token.from, token.to),
            format_token_kind(token.kind, KIND_WIDTH, use_colors),
            token.text
        ));
    }

    output
}
