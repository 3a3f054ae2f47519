//! Diagnose command implementation.
//!
//! Reads an evaluator error (JSON) and prints the diagnostics an editor would
//! show for it.

use std::fs;
use std::io::{self, Read};

use sample_filter_lang::{to_diagnostics, EvaluationError};

use super::{CommandContext, Result};
use crate::output::{format_diagnostics_json, format_diagnostics_table};

/// Options for the diagnose command.
pub struct DiagnoseOptions {
    /// Expression the error refers to.
    pub expression: String,
    /// Error file path, `-` for stdin, or `None` for no error.
    pub error: Option<String>,
}

/// Parses an evaluator error document. `null` means no error.
fn parse_error(json: &str) -> Result<Option<EvaluationError>> {
    Ok(serde_json::from_str(json)?)
}

/// Reads the evaluator error from a file or stdin.
fn read_error(source: Option<&str>) -> Result<Option<EvaluationError>> {
    let content = match source {
        None => return Ok(None),
        Some("-") => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        Some(path) => fs::read_to_string(path)?,
    };
    parse_error(&content)
}

/// Executes the diagnose command.
pub fn execute(ctx: &CommandContext, opts: &DiagnoseOptions) -> Result<()> {
    let error = read_error(opts.error.as_deref())?;
    let diagnostics = to_diagnostics(error.as_ref(), opts.expression.len());
    tracing::debug!(count = diagnostics.len(), "mapped evaluator error");

    if ctx.json_output {
        println!("{}", format_diagnostics_json(&opts.expression, &diagnostics)?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_diagnostics_table(&opts.expression, &diagnostics, ctx.use_colors)
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandError;
    use sample_filter_lang::Severity;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_error_with_span() {
        let error = parse_error(r#"{"message": "bad", "severity": "warning", "from": 1, "to": 3}"#)
            .unwrap()
            .unwrap();
        assert_eq!(error.message, "bad");
        assert_eq!(error.severity, Severity::Warning);
        assert_eq!((error.from, error.to), (Some(1), Some(3)));
    }

    #[test]
    fn test_parse_error_defaults() {
        let error = parse_error(r#"{"message": "bad"}"#).unwrap().unwrap();
        assert_eq!(error.severity, Severity::Error);
        assert!(error.from.is_none());
    }

    #[test]
    fn test_parse_null_is_no_error() {
        assert!(parse_error("null").unwrap().is_none());
    }

    #[test]
    fn test_parse_error_invalid() {
        assert!(matches!(parse_error("{}"), Err(CommandError::Json(_))));
    }

    #[test]
    fn test_read_error_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"message": "unknown field"}}"#).unwrap();

        let path = file.path().to_str().unwrap();
        let error = read_error(Some(path)).unwrap().unwrap();
        assert_eq!(error.message, "unknown field");
    }

    #[test]
    fn test_read_error_none() {
        assert!(read_error(None).unwrap().is_none());
    }
}
