//! Functions command implementation.

use sample_filter_lang::Grammar;

use super::{CommandContext, Result};
use crate::output::{format_grammar_json, format_grammar_table};

/// Executes the functions command.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let grammar = Grammar::standard();

    if ctx.json_output {
        println!("{}", format_grammar_json(grammar)?);
    } else if !ctx.quiet {
        print!("{}", format_grammar_table(grammar, ctx.use_colors));
    }

    Ok(())
}
