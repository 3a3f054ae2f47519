//! Static grammar tables for the filter language.
//!
//! The tables are plain data. A [`Grammar`] bundles them so the lexer and the
//! completion engine receive them explicitly instead of reaching for globals.

use serde::Serialize;

/// A reserved word of the filter language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Keyword {
    /// Spelling in source text. Multi-word keywords use a single space.
    pub name: &'static str,
    /// Human-readable description shown next to completions.
    pub description: &'static str,
}

impl Keyword {
    /// Number of whitespace-separated words in the keyword.
    pub fn word_count(&self) -> usize {
        self.name.split_whitespace().count()
    }
}

/// How a function consumes its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// Exactly one numeric argument.
    Unary,
    /// Two or more numeric arguments.
    Variadic,
    /// A single literal search string.
    SearchString,
}

impl Arity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Arity::Unary => "unary",
            Arity::Variadic => "variadic",
            Arity::SearchString => "search string",
        }
    }
}

/// A callable built into the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionInfo {
    pub name: &'static str,
    pub arity: Arity,
    pub description: &'static str,
}

/// A symbolic relational operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Operator {
    pub symbol: &'static str,
    pub description: &'static str,
}

pub const KEYWORDS: &[Keyword] = &[
    Keyword {
        name: "and",
        description: "Logical AND of two conditions",
    },
    Keyword {
        name: "or",
        description: "Logical OR of two conditions",
    },
    Keyword {
        name: "not",
        description: "Logical NOT of a condition",
    },
    Keyword {
        name: "in",
        description: "Membership test against a list of values",
    },
    Keyword {
        name: "not in",
        description: "Negated membership test against a list of values",
    },
    Keyword {
        name: "mod",
        description: "Remainder of integer division",
    },
];

pub const MATH_FUNCTIONS: &[FunctionInfo] = &[
    FunctionInfo {
        name: "min",
        arity: Arity::Variadic,
        description: "Minimum of two or more values",
    },
    FunctionInfo {
        name: "max",
        arity: Arity::Variadic,
        description: "Maximum of two or more values",
    },
    FunctionInfo {
        name: "abs",
        arity: Arity::Unary,
        description: "Absolute value",
    },
    FunctionInfo {
        name: "round",
        arity: Arity::Unary,
        description: "Round to the nearest integer",
    },
    FunctionInfo {
        name: "floor",
        arity: Arity::Unary,
        description: "Round down to the nearest integer",
    },
    FunctionInfo {
        name: "ceil",
        arity: Arity::Unary,
        description: "Round up to the nearest integer",
    },
    FunctionInfo {
        name: "sqrt",
        arity: Arity::Unary,
        description: "Square root",
    },
    FunctionInfo {
        name: "log",
        arity: Arity::Unary,
        description: "Natural logarithm",
    },
    FunctionInfo {
        name: "log2",
        arity: Arity::Unary,
        description: "Base-2 logarithm",
    },
    FunctionInfo {
        name: "log10",
        arity: Arity::Unary,
        description: "Base-10 logarithm",
    },
    FunctionInfo {
        name: "exp",
        arity: Arity::Unary,
        description: "e raised to the given power",
    },
];

pub const SAMPLE_FUNCTIONS: &[FunctionInfo] = &[
    FunctionInfo {
        name: "input_contains",
        arity: Arity::SearchString,
        description: "Checks if the sample input contains a regular expression",
    },
    FunctionInfo {
        name: "target_contains",
        arity: Arity::SearchString,
        description: "Checks if the sample target contains a regular expression",
    },
    FunctionInfo {
        name: "output_contains",
        arity: Arity::SearchString,
        description: "Checks if the sample output contains a regular expression",
    },
    FunctionInfo {
        name: "error_contains",
        arity: Arity::SearchString,
        description: "Checks if the sample error contains a regular expression",
    },
];

pub const RELATIONS: &[Operator] = &[
    Operator {
        symbol: "==",
        description: "Equal to",
    },
    Operator {
        symbol: "!=",
        description: "Not equal to",
    },
    Operator {
        symbol: "<",
        description: "Less than",
    },
    Operator {
        symbol: "<=",
        description: "Less than or equal to",
    },
    Operator {
        symbol: ">",
        description: "Greater than",
    },
    Operator {
        symbol: ">=",
        description: "Greater than or equal to",
    },
    Operator {
        symbol: "~=",
        description: "Loosely equal to (custom score comparison)",
    },
];

static STANDARD_GRAMMAR: Grammar = Grammar::STANDARD;

/// The set of tables that define the language's reserved spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    keywords: &'static [Keyword],
    math_functions: &'static [FunctionInfo],
    sample_functions: &'static [FunctionInfo],
    relations: &'static [Operator],
}

impl Grammar {
    /// The standard filter language.
    pub const STANDARD: Grammar = Grammar {
        keywords: KEYWORDS,
        math_functions: MATH_FUNCTIONS,
        sample_functions: SAMPLE_FUNCTIONS,
        relations: RELATIONS,
    };

    /// Creates a grammar from custom tables.
    pub const fn new(
        keywords: &'static [Keyword],
        math_functions: &'static [FunctionInfo],
        sample_functions: &'static [FunctionInfo],
        relations: &'static [Operator],
    ) -> Self {
        Self {
            keywords,
            math_functions,
            sample_functions,
            relations,
        }
    }

    /// Returns a shared reference to the standard grammar.
    pub fn standard() -> &'static Grammar {
        &STANDARD_GRAMMAR
    }

    pub fn keywords(&self) -> &'static [Keyword] {
        self.keywords
    }

    pub fn math_functions(&self) -> &'static [FunctionInfo] {
        self.math_functions
    }

    pub fn sample_functions(&self) -> &'static [FunctionInfo] {
        self.sample_functions
    }

    pub fn relations(&self) -> &'static [Operator] {
        self.relations
    }

    /// Keywords ordered so that longer phrases are tried first.
    ///
    /// The sort is stable, so keywords with the same word count keep their
    /// table order.
    pub fn keywords_by_word_count(&self) -> Vec<&'static Keyword> {
        let mut keywords: Vec<&'static Keyword> = self.keywords.iter().collect();
        keywords.sort_by(|a, b| b.word_count().cmp(&a.word_count()));
        keywords
    }

    pub fn keyword(&self, name: &str) -> Option<&'static Keyword> {
        self.keywords.iter().find(|k| k.name == name)
    }

    pub fn math_function(&self, name: &str) -> Option<&'static FunctionInfo> {
        self.math_functions.iter().find(|f| f.name == name)
    }

    pub fn sample_function(&self, name: &str) -> Option<&'static FunctionInfo> {
        self.sample_functions.iter().find(|f| f.name == name)
    }

    pub fn relation(&self, symbol: &str) -> Option<&'static Operator> {
        self.relations.iter().find(|r| r.symbol == symbol)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::STANDARD
    }
}
