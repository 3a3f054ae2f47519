//! Grammar table output formatting.

use owo_colors::OwoColorize;
use sample_filter_lang::{FunctionInfo, Grammar, Keyword, Operator};
use serde::Serialize;

use super::helpers::format_header;

/// JSON output structure for the functions command.
#[derive(Serialize)]
pub struct GrammarOutput<'a> {
    pub keywords: &'a [Keyword],
    pub math_functions: &'a [FunctionInfo],
    pub sample_functions: &'a [FunctionInfo],
    pub relations: &'a [Operator],
}

/// Formats the grammar tables as JSON.
pub fn format_grammar_json(grammar: &Grammar) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&GrammarOutput {
        keywords: grammar.keywords(),
        math_functions: grammar.math_functions(),
        sample_functions: grammar.sample_functions(),
        relations: grammar.relations(),
    })
}

/// Formats the grammar tables as titled sections.
pub fn format_grammar_table(grammar: &Grammar, use_colors: bool) -> String {
    let mut output = String::new();

    push_title(&mut output, "Keywords", use_colors);
    for keyword in grammar.keywords() {
        output.push_str(&format!("  {:<18} {}\n", keyword.name, keyword.description));
    }

    push_title(&mut output, "Math functions", use_colors);
    push_functions(&mut output, grammar.math_functions(), use_colors);

    push_title(&mut output, "Sample functions", use_colors);
    push_functions(&mut output, grammar.sample_functions(), use_colors);

    push_title(&mut output, "Relations", use_colors);
    for relation in grammar.relations() {
        output.push_str(&format!("  {:<18} {}\n", relation.symbol, relation.description));
    }

    output
}

fn push_title(output: &mut String, title: &str, use_colors: bool) {
    if !output.is_empty() {
        output.push('\n');
    }
    if use_colors {
        output.push_str(&format!("{}\n", title.bold()));
    } else {
        output.push_str(title);
        output.push('\n');
    }
}

fn push_functions(output: &mut String, functions: &[FunctionInfo], use_colors: bool) {
    output.push_str(&format_header(
        &format!("  {:<18} {:<14} {}", "Name", "Arity", "Description"),
        use_colors,
    ));
    for function in functions {
        output.push_str(&format!(
            "  {:<18} {:<14} {}\n",
            format!("{}()", function.name),
            function.arity.as_str(),
            function.description
        ));
    }
}
