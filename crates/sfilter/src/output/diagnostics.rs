//! Diagnostic output formatting.

use sample_filter_lang::Diagnostic;
use serde::Serialize;

use super::helpers::{format_header, format_severity, format_span};

/// JSON output structure for the diagnose command.
#[derive(Serialize)]
pub struct DiagnosticsOutput<'a> {
    pub expression: &'a str,
    pub diagnostics: &'a [Diagnostic],
}

/// Formats diagnostics as JSON.
pub fn format_diagnostics_json(
    expression: &str,
    diagnostics: &[Diagnostic],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DiagnosticsOutput {
        expression,
        diagnostics,
    })
}

/// Formats diagnostics as a table, underlining each span in the expression.
pub fn format_diagnostics_table(
    expression: &str,
    diagnostics: &[Diagnostic],
    use_colors: bool,
) -> String {
    if diagnostics.is_empty() {
        return "No diagnostics.\n".to_string();
    }

    let mut output = format_header(
        &format!("{:<10} {:<8} {}", "Span", "Severity", "Message"),
        use_colors,
    );
    for diagnostic in diagnostics {
        let severity = format_severity(diagnostic.severity, 8, use_colors);
        output.push_str(&format!(
            "{:<10} {} {}\n",
            format_span(diagnostic.from, diagnostic.to),
            severity,
            diagnostic.message
        ));
        output.push_str(&underline(expression, diagnostic));
    }

    output
}

/// The expression with `^` under the diagnostic's characters.
fn underline(expression: &str, diagnostic: &Diagnostic) -> String {
    let to = diagnostic.to.min(expression.len());
    let from = diagnostic.from.min(to);
    let (Some(before), Some(span)) = (expression.get(..from), expression.get(from..to)) else {
        return String::new();
    };
    let indent = before.chars().count();
    let width = span.chars().count().max(1);
    format!(
        "  {expression}\n  {}{}\n",
        " ".repeat(indent),
        "^".repeat(width)
    )
}
