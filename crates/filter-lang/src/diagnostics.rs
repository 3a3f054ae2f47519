//! Maps evaluator errors onto editor diagnostics.
//!
//! The evaluator lives outside this crate. At most one evaluation error is
//! live at a time, so at most one diagnostic is produced.

use serde::{Deserialize, Serialize};

/// Severity of an evaluator error or diagnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// An error reported by the expression evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationError {
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
    /// Start of the offending span, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<usize>,
    /// End of the offending span, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<usize>,
}

impl EvaluationError {
    /// Creates an error with no span.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            from: None,
            to: None,
        }
    }

    pub fn with_span(mut self, from: usize, to: usize) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }
}

/// A message anchored to a span of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub from: usize,
    pub to: usize,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    /// Builds the diagnostic for `error`, defaulting a missing start to the
    /// beginning of the document and a missing end to its length.
    pub fn from_error(error: &EvaluationError, document_length: usize) -> Self {
        Self {
            from: error.from.unwrap_or(0),
            to: error.to.unwrap_or(document_length),
            severity: error.severity,
            message: error.message.clone(),
        }
    }
}

/// Converts the current evaluation error, if any, into diagnostics.
pub fn to_diagnostics(error: Option<&EvaluationError>, document_length: usize) -> Vec<Diagnostic> {
    error
        .map(|e| Diagnostic::from_error(e, document_length))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_error_no_diagnostics() {
        assert!(to_diagnostics(None, 10).is_empty());
    }

    #[test]
    fn test_error_with_span() {
        let error = EvaluationError::new("unknown field 'acc'", Severity::Error).with_span(0, 3);
        let diagnostics = to_diagnostics(Some(&error), 12);
        assert_eq!(
            diagnostics,
            vec![Diagnostic {
                from: 0,
                to: 3,
                severity: Severity::Error,
                message: "unknown field 'acc'".to_string(),
            }]
        );
    }

    #[test]
    fn test_error_without_span_covers_document() {
        let error = EvaluationError::new("expression is not boolean", Severity::Warning);
        let diagnostics = to_diagnostics(Some(&error), 17);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!((diagnostics[0].from, diagnostics[0].to), (0, 17));
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn test_partial_span() {
        let error = EvaluationError {
            message: "unexpected end".to_string(),
            severity: Severity::Error,
            from: Some(5),
            to: None,
        };
        let diagnostic = Diagnostic::from_error(&error, 9);
        assert_eq!((diagnostic.from, diagnostic.to), (5, 9));
    }

    #[test]
    fn test_evaluation_error_deserialize_defaults() {
        let error: EvaluationError = serde_json::from_str(r#"{"message": "boom"}"#).unwrap();
        assert_eq!(error.severity, Severity::Error);
        assert!(error.from.is_none());
        assert!(error.to.is_none());

        let error: EvaluationError =
            serde_json::from_str(r#"{"message": "hm", "severity": "info", "from": 2, "to": 4}"#)
                .unwrap();
        assert_eq!(error.severity, Severity::Info);
        assert_eq!((error.from, error.to), (Some(2), Some(4)));
    }
}
