//! Lexer (tokenizer) for filter expressions.
//!
//! The lexer never fails. Characters that start no token (whitespace
//! included) are skipped one at a time and produce nothing, so every input is
//! consumed completely.

use serde::Serialize;

use crate::grammar::{Grammar, Keyword};

/// Relational operators, two-character spellings first.
const RELATIONS: &[&str] = &["==", "!=", "<=", ">=", "~=", "<", ">"];

/// Characters that start a relation but are not valid on their own.
const PARTIAL_RELATIONS: &[char] = &['=', '!', '~'];

/// Arithmetic, grouping and access punctuation.
const PUNCTUATION: &[char] = &['+', '-', '*', '/', '^', '(', ')', ',', '.'];

/// The kind of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// A double-quoted string with its closing quote.
    String,
    /// A double-quoted string running to the end of input.
    UnterminatedString,
    /// A numeric literal with optional sign and fraction.
    Number,
    /// A reserved word such as `and` or `not in`.
    Keyword,
    /// A numeric function such as `abs`.
    MathFunction,
    /// A sample-inspection function such as `input_contains`.
    SampleFunction,
    /// Any other identifier; usually a field name.
    Variable,
    /// A relational operator such as `<=`.
    Relation,
    /// Punctuation, arithmetic, or a relation typed halfway.
    MiscOperator,
}

impl TokenKind {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::String => "string",
            TokenKind::UnterminatedString => "unterminated_string",
            TokenKind::Number => "number",
            TokenKind::Keyword => "keyword",
            TokenKind::MathFunction => "math_function",
            TokenKind::SampleFunction => "sample_function",
            TokenKind::Variable => "variable",
            TokenKind::Relation => "relation",
            TokenKind::MiscOperator => "misc_operator",
        }
    }

    /// Returns true for string, unterminated string and number tokens.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::UnterminatedString | TokenKind::Number
        )
    }
}

/// A token with its span in the input.
///
/// `from` and `to` are half-open byte offsets into the source and always fall
/// on character boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub from: usize,
    pub to: usize,
}

impl Token {
    /// Returns true if the token is the given punctuation or operator text.
    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }
}

/// Lexer for tokenizing filter expressions.
pub struct Lexer<'a> {
    input: &'a str,
    /// Current byte position in the input string.
    position: usize,
    grammar: &'a Grammar,
    /// Keywords in match order (most words first).
    keywords: Vec<&'static Keyword>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input using the standard grammar.
    pub fn new(input: &'a str) -> Self {
        Self::with_grammar(input, Grammar::standard())
    }

    /// Creates a new lexer for the given input and grammar tables.
    pub fn with_grammar(input: &'a str, grammar: &'a Grammar) -> Self {
        Self {
            input,
            position: 0,
            grammar,
            keywords: grammar.keywords_by_word_count(),
        }
    }

    /// Returns the next token, or None once the input is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        while self.position < self.input.len() {
            let rest = &self.input[self.position..];
            if let Some((kind, len)) = self.match_at(rest) {
                let from = self.position;
                self.position += len;
                return Some(Token {
                    kind,
                    text: rest[..len].to_string(),
                    from,
                    to: self.position,
                });
            }
            // Nothing matched: skip a single character
            self.position += rest.chars().next().map_or(1, char::len_utf8);
        }
        None
    }

    /// Collects all tokens into a vector.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tracing::trace!(count = tokens.len(), "tokenized filter expression");
        tokens
    }

    /// Applies the token rules in priority order at the start of `rest`.
    fn match_at(&self, rest: &str) -> Option<(TokenKind, usize)> {
        if let Some(after_quote) = rest.strip_prefix('"') {
            return Some(match after_quote.find('"') {
                Some(end) => (TokenKind::String, end + 2),
                None => (TokenKind::UnterminatedString, rest.len()),
            });
        }

        if let Some(len) = number_len(rest) {
            return Some((TokenKind::Number, len));
        }

        if let Some(len) = self
            .keywords
            .iter()
            .find_map(|keyword| keyword_len(rest, keyword.name))
        {
            return Some((TokenKind::Keyword, len));
        }

        if let Some(len) = self
            .grammar
            .math_functions()
            .iter()
            .find_map(|function| word_len(rest, function.name))
        {
            return Some((TokenKind::MathFunction, len));
        }

        if let Some(len) = self
            .grammar
            .sample_functions()
            .iter()
            .find_map(|function| word_len(rest, function.name))
        {
            return Some((TokenKind::SampleFunction, len));
        }

        if let Some(len) = identifier_len(rest) {
            return Some((TokenKind::Variable, len));
        }

        if let Some(relation) = RELATIONS.iter().find(|r| rest.starts_with(**r)) {
            return Some((TokenKind::Relation, relation.len()));
        }

        let c = rest.chars().next()?;
        if PARTIAL_RELATIONS.contains(&c) || PUNCTUATION.contains(&c) {
            return Some((TokenKind::MiscOperator, c.len_utf8()));
        }

        None
    }
}

/// Tokenizes `input` with the standard grammar.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// True if no identifier character follows `offset`.
fn at_word_boundary(rest: &str, offset: usize) -> bool {
    !rest[offset..]
        .chars()
        .next()
        .is_some_and(is_identifier_continue)
}

/// Length of `[+-]?\d+(\.\d+)?` at the start of `rest`.
fn number_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return None;
    }
    if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    Some(i)
}

/// Matches a possibly multi-word keyword; words may be separated by any run
/// of whitespace.
fn keyword_len(rest: &str, keyword: &str) -> Option<usize> {
    let mut offset = 0;
    for (index, word) in keyword.split_whitespace().enumerate() {
        if index > 0 {
            let tail = &rest[offset..];
            let gap = tail.len() - tail.trim_start().len();
            if gap == 0 {
                return None;
            }
            offset += gap;
        }
        if !rest[offset..].starts_with(word) {
            return None;
        }
        offset += word.len();
    }
    at_word_boundary(rest, offset).then_some(offset)
}

fn word_len(rest: &str, word: &str) -> Option<usize> {
    (rest.starts_with(word) && at_word_boundary(rest, word.len())).then_some(word.len())
}

fn identifier_len(rest: &str) -> Option<usize> {
    let mut chars = rest.chars();
    if !chars.next().is_some_and(is_identifier_start) {
        return None;
    }
    // Identifier characters are ASCII, so char count equals byte count
    Some(1 + chars.take_while(|c| is_identifier_continue(*c)).count())
}

/// Moves `offset` back onto the nearest character boundary within `input`.
pub(crate) fn clamp_to_char_boundary(input: &str, offset: usize) -> usize {
    let mut offset = offset.min(input.len());
    while !input.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<(TokenKind, String)> {
        tokenize(input)
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    fn kind(kind: TokenKind, text: &str) -> (TokenKind, String) {
        (kind, text.to_string())
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
    }

    #[test]
    fn test_tokenize_string() {
        let tokens = tokenize("\"abc\"");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "\"abc\"");
        assert_eq!((tokens[0].from, tokens[0].to), (0, 5));
    }

    #[test]
    fn test_tokenize_unterminated_string() {
        let tokens = tokenize("\"abc");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::UnterminatedString);
        assert_eq!(tokens[0].text, "\"abc");
        assert_eq!(tokens[0].to, 4);
    }

    #[test]
    fn test_unterminated_string_swallows_rest() {
        assert_eq!(
            kinds("x == \"a and b"),
            vec![
                kind(TokenKind::Variable, "x"),
                kind(TokenKind::Relation, "=="),
                kind(TokenKind::UnterminatedString, "\"a and b"),
            ]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(kinds("42"), vec![kind(TokenKind::Number, "42")]);
        assert_eq!(kinds("-3.5"), vec![kind(TokenKind::Number, "-3.5")]);
        assert_eq!(kinds("+7"), vec![kind(TokenKind::Number, "+7")]);
    }

    #[test]
    fn test_number_without_fraction_digits() {
        // "1." is a number followed by a dot
        assert_eq!(
            kinds("1."),
            vec![
                kind(TokenKind::Number, "1"),
                kind(TokenKind::MiscOperator, "."),
            ]
        );
    }

    #[test]
    fn test_sign_without_digits_is_operator() {
        assert_eq!(
            kinds("a - b"),
            vec![
                kind(TokenKind::Variable, "a"),
                kind(TokenKind::MiscOperator, "-"),
                kind(TokenKind::Variable, "b"),
            ]
        );
    }

    #[test]
    fn test_not_in_is_single_keyword() {
        assert_eq!(
            kinds("not in x"),
            vec![
                kind(TokenKind::Keyword, "not in"),
                kind(TokenKind::Variable, "x"),
            ]
        );
    }

    #[test]
    fn test_not_in_with_wide_gap() {
        assert_eq!(kinds("not   in"), vec![kind(TokenKind::Keyword, "not   in")]);
    }

    #[test]
    fn test_not_followed_by_identifier() {
        assert_eq!(
            kinds("not inside"),
            vec![
                kind(TokenKind::Keyword, "not"),
                kind(TokenKind::Variable, "inside"),
            ]
        );
    }

    #[test]
    fn test_keywords_need_word_boundary() {
        assert_eq!(kinds("order"), vec![kind(TokenKind::Variable, "order")]);
        assert_eq!(kinds("android"), vec![kind(TokenKind::Variable, "android")]);
        assert_eq!(kinds("and_x"), vec![kind(TokenKind::Variable, "and_x")]);
    }

    #[test]
    fn test_keyword_before_paren() {
        assert_eq!(
            kinds("not(a)"),
            vec![
                kind(TokenKind::Keyword, "not"),
                kind(TokenKind::MiscOperator, "("),
                kind(TokenKind::Variable, "a"),
                kind(TokenKind::MiscOperator, ")"),
            ]
        );
    }

    #[test]
    fn test_tokenize_functions() {
        assert_eq!(
            kinds("log2(x) log"),
            vec![
                kind(TokenKind::MathFunction, "log2"),
                kind(TokenKind::MiscOperator, "("),
                kind(TokenKind::Variable, "x"),
                kind(TokenKind::MiscOperator, ")"),
                kind(TokenKind::MathFunction, "log"),
            ]
        );
        assert_eq!(
            kinds("input_contains(\"x\")"),
            vec![
                kind(TokenKind::SampleFunction, "input_contains"),
                kind(TokenKind::MiscOperator, "("),
                kind(TokenKind::String, "\"x\""),
                kind(TokenKind::MiscOperator, ")"),
            ]
        );
    }

    #[test]
    fn test_function_prefix_is_variable() {
        assert_eq!(kinds("absolute"), vec![kind(TokenKind::Variable, "absolute")]);
    }

    #[test]
    fn test_tokenize_relations() {
        for relation in ["==", "!=", "<=", ">=", "<", ">", "~="] {
            assert_eq!(kinds(relation), vec![kind(TokenKind::Relation, relation)]);
        }
    }

    #[test]
    fn test_partial_relations() {
        for partial in ["=", "!", "~"] {
            assert_eq!(kinds(partial), vec![kind(TokenKind::MiscOperator, partial)]);
        }
    }

    #[test]
    fn test_tokenize_punctuation() {
        let tokens = kinds("+-*/^(),.");
        // "-" is not followed by a digit so it stays an operator
        assert_eq!(tokens.len(), 9);
        assert!(tokens.iter().all(|(k, _)| *k == TokenKind::MiscOperator));
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        let tokens = tokenize("a @ é b");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert_eq!(tokens[1].from, "a @ é ".len());
    }

    #[test]
    fn test_member_access() {
        assert_eq!(
            kinds("web_search.accuracy > 0.5"),
            vec![
                kind(TokenKind::Variable, "web_search"),
                kind(TokenKind::MiscOperator, "."),
                kind(TokenKind::Variable, "accuracy"),
                kind(TokenKind::Relation, ">"),
                kind(TokenKind::Number, "0.5"),
            ]
        );
    }

    #[test]
    fn test_spans_are_ordered_and_match_text() {
        let input = "(accuracy >= 0.5 and grade in (\"A\", \"B\")) or not passed";
        let tokens = tokenize(input);
        let mut last_end = 0;
        for token in &tokens {
            assert!(token.from >= last_end);
            assert!(token.to > token.from);
            assert_eq!(&input[token.from..token.to], token.text);
            last_end = token.to;
        }
    }

    #[test]
    fn test_clamp_to_char_boundary() {
        let input = "aé";
        assert_eq!(clamp_to_char_boundary(input, 2), 1);
        assert_eq!(clamp_to_char_boundary(input, 3), 3);
        assert_eq!(clamp_to_char_boundary(input, 10), 3);
    }
}
