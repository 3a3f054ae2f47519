//! Common helper functions for output formatting.

use owo_colors::OwoColorize;
use sample_filter_lang::{CompletionKind, Severity, TokenKind};

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a half-open byte span as `from..to`.
pub fn format_span(from: usize, to: usize) -> String {
    format!("{from}..{to}")
}

/// Pads `text` to `width` and colors it, keeping alignment intact.
fn colored_cell(text: &str, width: usize, paint: impl Fn(&str) -> String) -> String {
    let padded = format!("{text:<width$}");
    paint(&padded)
}

/// Formats a token kind for display.
pub fn format_token_kind(kind: TokenKind, width: usize, use_colors: bool) -> String {
    if !use_colors {
        return format!("{:<width$}", kind.as_str());
    }
    colored_cell(kind.as_str(), width, |s| match kind {
        TokenKind::Keyword => s.magenta().to_string(),
        TokenKind::MathFunction | TokenKind::SampleFunction => s.blue().to_string(),
        TokenKind::String | TokenKind::Number => s.green().to_string(),
        TokenKind::UnterminatedString => s.red().to_string(),
        TokenKind::Relation => s.yellow().to_string(),
        TokenKind::Variable => s.cyan().to_string(),
        TokenKind::MiscOperator => s.dimmed().to_string(),
    })
}

/// Formats a completion kind for display.
pub fn format_completion_kind(kind: CompletionKind, width: usize, use_colors: bool) -> String {
    if !use_colors {
        return format!("{:<width$}", kind.as_str());
    }
    colored_cell(kind.as_str(), width, |s| match kind {
        CompletionKind::Keyword => s.magenta().to_string(),
        CompletionKind::MathFunction | CompletionKind::SampleFunction => s.blue().to_string(),
        CompletionKind::Field | CompletionKind::Member => s.cyan().to_string(),
        CompletionKind::Relation => s.yellow().to_string(),
        CompletionKind::Value => s.green().to_string(),
    })
}

/// Formats a severity for display.
pub fn format_severity(severity: Severity, width: usize, use_colors: bool) -> String {
    if !use_colors {
        return format!("{:<width$}", severity.as_str());
    }
    colored_cell(severity.as_str(), width, |s| match severity {
        Severity::Error => s.red().bold().to_string(),
        Severity::Warning => s.yellow().to_string(),
        Severity::Info => s.blue().to_string(),
    })
}

/// Formats a table header line.
pub fn format_header(header: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", header.dimmed())
    } else {
        format!("{header}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a longer description", 10), "a longe...");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_format_span() {
        assert_eq!(format_span(3, 7), "3..7");
    }

    #[test]
    fn test_kinds_without_colors_are_padded() {
        assert_eq!(format_token_kind(TokenKind::Number, 8, false), "number  ");
        assert_eq!(
            format_completion_kind(CompletionKind::Field, 6, false),
            "field "
        );
    }

    #[test]
    fn test_colored_kind_keeps_text() {
        let colored = format_token_kind(TokenKind::Keyword, 10, true);
        assert!(colored.contains("keyword   "));
        assert_ne!(colored, "keyword   ");
    }

    #[test]
    fn test_format_severity() {
        assert_eq!(format_severity(Severity::Warning, 8, false), "warning ");
        assert!(format_severity(Severity::Error, 8, true).contains("error   "));
    }
}
