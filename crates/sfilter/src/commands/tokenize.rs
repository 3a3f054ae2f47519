//! Tokenize command implementation.

use sample_filter_lang::tokenize;

use super::{CommandContext, Result};
use crate::output::{format_tokens_json, format_tokens_table};

/// Options for the tokenize command.
pub struct TokenizeOptions {
    /// Expression to tokenize.
    pub expression: String,
}

/// Executes the tokenize command.
pub fn execute(ctx: &CommandContext, opts: &TokenizeOptions) -> Result<()> {
    let tokens = tokenize(&opts.expression);

    if ctx.json_output {
        println!("{}", format_tokens_json(&opts.expression, &tokens)?);
    } else if !ctx.quiet {
        print!("{}", format_tokens_table(&tokens, ctx.use_colors));
    }

    Ok(())
}
