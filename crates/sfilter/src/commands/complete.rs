//! Complete command implementation.
//!
//! Runs the completion engine at a cursor and optionally applies one of the
//! offered options.

use sample_filter_lang::{AppliedCompletion, CompletionEngine, CompletionResult, FieldCatalog};

use super::{CommandContext, CommandError, Result};
use crate::output::{
    format_applied_json, format_applied_table, format_completions_json, format_completions_table,
};

/// Options for the complete command.
pub struct CompleteOptions {
    /// Expression being edited.
    pub expression: String,
    /// Byte offset of the cursor; end of the expression when `None`.
    pub cursor: Option<usize>,
    /// Whether the request was explicitly triggered.
    pub explicit: bool,
    /// Label of the option to apply.
    pub apply: Option<String>,
}

/// Checks that `cursor` lies on a character boundary of `expression`.
fn validate_cursor(expression: &str, cursor: Option<usize>) -> Result<usize> {
    let cursor = cursor.unwrap_or(expression.len());
    if expression.is_char_boundary(cursor) {
        Ok(cursor)
    } else {
        Err(CommandError::InvalidCursor {
            cursor,
            len: expression.len(),
        })
    }
}

/// Runs the engine and, when requested, applies the labelled option.
fn run(
    catalog: &FieldCatalog,
    opts: &CompleteOptions,
    always_explicit: bool,
) -> Result<(usize, Option<CompletionResult>, Option<AppliedCompletion>)> {
    let cursor = validate_cursor(&opts.expression, opts.cursor)?;
    let explicit = opts.explicit || always_explicit;
    let result = CompletionEngine::new().complete(&opts.expression, cursor, catalog, explicit);

    let applied = match &opts.apply {
        Some(label) => {
            let (from, option) = result
                .as_ref()
                .and_then(|r| r.option(label).map(|o| (r.from, o)))
                .ok_or_else(|| CommandError::UnknownOption(label.clone()))?;
            Some(option.apply_to(&opts.expression, from, cursor))
        }
        None => None,
    };

    Ok((cursor, result, applied))
}

/// Executes the complete command.
pub fn execute(
    ctx: &CommandContext,
    catalog: &FieldCatalog,
    opts: &CompleteOptions,
) -> Result<()> {
    let (cursor, result, applied) = run(catalog, opts, ctx.always_explicit)?;

    if ctx.verbose {
        let count = result.as_ref().map_or(0, |r| r.options.len());
        eprintln!("{count} option(s) at byte {cursor}");
    }

    match (applied, &opts.apply) {
        (Some(applied), Some(label)) => {
            if ctx.json_output {
                println!("{}", format_applied_json(label, &applied)?);
            } else if !ctx.quiet {
                print!("{}", format_applied_table(&applied, ctx.use_colors));
            }
        }
        _ => {
            if ctx.json_output {
                let json = format_completions_json(&opts.expression, cursor, result.as_ref())?;
                println!("{json}");
            } else if !ctx.quiet {
                print!("{}", format_completions_table(result.as_ref(), ctx.use_colors));
            }
        }
    }

    Ok(())
}
