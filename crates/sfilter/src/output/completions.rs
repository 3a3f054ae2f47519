//! Completion output formatting.

use owo_colors::OwoColorize;
use sample_filter_lang::{AppliedCompletion, CompletionResult, CompletionSection};
use serde::Serialize;

use super::helpers::{format_completion_kind, format_header, truncate_str};

const LABEL_WIDTH: usize = 24;
const KIND_WIDTH: usize = 16;
const INFO_WIDTH: usize = 48;

/// JSON output structure for the complete command.
#[derive(Serialize)]
pub struct CompletionOutput<'a> {
    pub expression: &'a str,
    pub cursor: usize,
    /// Absent when the engine had nothing to offer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a CompletionResult>,
}

/// JSON output structure for an applied completion.
#[derive(Serialize)]
pub struct AppliedOutput<'a> {
    pub label: &'a str,
    pub expression: &'a str,
    pub cursor: usize,
}

/// Formats a completion result as JSON.
pub fn format_completions_json(
    expression: &str,
    cursor: usize,
    result: Option<&CompletionResult>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&CompletionOutput {
        expression,
        cursor,
        result,
    })
}

/// Formats a completion result as a table, suggested options first and the
/// generic set beneath a separator.
pub fn format_completions_table(result: Option<&CompletionResult>, use_colors: bool) -> String {
    let Some(result) = result.filter(|r| !r.options.is_empty()) else {
        return "No completions.\n".to_string();
    };

    let mut output = format!("Replace from byte {}\n\n", result.from);
    output.push_str(&format_header(
        &format!(
            "{:<LABEL_WIDTH$} {:<KIND_WIDTH$} {}",
            "Label", "Kind", "Info"
        ),
        use_colors,
    ));

    let mut in_more = false;
    for option in &result.options {
        if option.section == CompletionSection::More && !in_more {
            in_more = true;
            let separator = "-- more --";
            if use_colors {
                output.push_str(&format!("{}\n", separator.dimmed()));
            } else {
                output.push_str(separator);
                output.push('\n');
            }
        }

        let label = if option.call {
            format!("{}()", option.label)
        } else {
            option.label.clone()
        };
        let info = option.info.as_deref().unwrap_or("");
        output.push_str(&format!(
            "{:<LABEL_WIDTH$} {} {}\n",
            truncate_str(&label, LABEL_WIDTH),
            format_completion_kind(option.kind, KIND_WIDTH, use_colors),
            truncate_str(info, INFO_WIDTH)
        ));
    }

    output
}

/// Formats an applied completion as JSON.
pub fn format_applied_json(
    label: &str,
    applied: &AppliedCompletion,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&AppliedOutput {
        label,
        expression: &applied.text,
        cursor: applied.cursor,
    })
}

/// Formats an applied completion as the new expression with a caret under
/// the cursor.
pub fn format_applied_table(applied: &AppliedCompletion, use_colors: bool) -> String {
    // Caret column counts characters, not bytes
    let column = applied.text[..applied.cursor].chars().count();
    let caret = format!("{:>width$}", "^", width = column + 1);
    if use_colors {
        format!("{}\n{}\n", applied.text, caret.green())
    } else {
        format!("{}\n{}\n", applied.text, caret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sample_filter_lang::{complete, FieldCatalog, FieldDescriptor, ScoreType};

    fn catalog() -> FieldCatalog {
        FieldCatalog::new(vec![
            FieldDescriptor::new("accuracy", ScoreType::Numeric).with_tooltip("Mean accuracy"),
            FieldDescriptor::new("grade", ScoreType::Categorical).with_categories(["A", "B"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_table_separates_more_section() {
        let result = complete("", 0, &catalog(), false);
        let table = format_completions_table(result.as_ref(), false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Replace from byte 0");
        assert!(lines[3].starts_with("accuracy"));
        assert!(lines[3].contains("Mean accuracy"));
        let separator = lines.iter().position(|l| *l == "-- more --").unwrap();
        let and = lines.iter().position(|l| l.starts_with("and ")).unwrap();
        assert!(separator < and);
        assert!(table.contains("input_contains()"));
    }

    #[test]
    fn test_table_without_result() {
        assert_eq!(format_completions_table(None, false), "No completions.\n");
    }

    #[test]
    fn test_json_omits_missing_result() {
        let json = format_completions_json("bogus ", 6, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cursor"], 6);
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_json_lists_options() {
        let result = complete("grade == ", 9, &catalog(), false);
        let json = format_completions_json("grade == ", 9, result.as_ref()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["result"]["from"], 9);
        assert_eq!(value["result"]["options"][0]["label"], "A");
        assert_eq!(value["result"]["options"][0]["kind"], "value");
        assert_eq!(value["result"]["options"][0]["section"], "suggested");
    }

    #[test]
    fn test_applied_table_places_caret() {
        let applied = AppliedCompletion {
            text: "abs()".to_string(),
            cursor: 4,
        };
        assert_eq!(format_applied_table(&applied, false), "abs()\n    ^\n");
    }

    #[test]
    fn test_applied_json() {
        let applied = AppliedCompletion {
            text: "accuracy ".to_string(),
            cursor: 9,
        };
        let json = format_applied_json("accuracy", &applied).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["expression"], "accuracy ");
        assert_eq!(value["cursor"], 9);
    }
}
