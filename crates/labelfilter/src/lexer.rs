//! Lexer (tokenizer) for filter expressions.

use std::fmt;
use std::str::CharIndices;

use super::error::{FilterError, FilterResult};

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    /// The token.
    pub token: FilterToken,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

impl PositionedToken {
    /// Creates a positioned token.
    pub fn new(token: FilterToken, position: usize) -> Self {
        Self { token, position }
    }
}

/// A token in a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken {
    /// A run of decimal digits naming a label.
    Literal(String),

    // ==================== Operators ====================
    /// The AND operator (`&`).
    And,

    /// The OR operator (`|`).
    Or,

    /// The NOT operator (`!`).
    Not,

    /// Opening parenthesis `(`.
    OpenParen,

    /// Closing parenthesis `)`.
    CloseParen,
}

impl FilterToken {
    /// Maps an operator or parenthesis character to its token.
    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '&' => Some(FilterToken::And),
            '|' => Some(FilterToken::Or),
            '!' => Some(FilterToken::Not),
            '(' => Some(FilterToken::OpenParen),
            ')' => Some(FilterToken::CloseParen),
            _ => None,
        }
    }

    /// Returns the source character for operators and parentheses.
    pub fn symbol(&self) -> Option<char> {
        match self {
            FilterToken::And => Some('&'),
            FilterToken::Or => Some('|'),
            FilterToken::Not => Some('!'),
            FilterToken::OpenParen => Some('('),
            FilterToken::CloseParen => Some(')'),
            FilterToken::Literal(_) => None,
        }
    }

    /// Binding strength of a logical operator: `|` < `&` < `!`.
    ///
    /// Parentheses and literals have no precedence.
    pub fn precedence(&self) -> Option<u8> {
        match self {
            FilterToken::Or => Some(1),
            FilterToken::And => Some(2),
            FilterToken::Not => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterToken::Literal(text) => f.write_str(text),
            other => match other.symbol() {
                Some(c) => write!(f, "{c}"),
                None => Ok(()),
            },
        }
    }
}

/// Lexer for tokenizing filter expressions.
///
/// Only space and tab are treated as whitespace. Any character that is not
/// whitespace, a digit, an operator or a parenthesis aborts tokenization.
pub struct Lexer<'a> {
    chars: CharIndices<'a>,
    /// Digits of the literal being accumulated, with its start position.
    pending: Option<(usize, String)>,
    tokens: Vec<PositionedToken>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices(),
            pending: None,
            tokens: Vec::new(),
        }
    }

    /// Pushes the in-progress literal, if any.
    fn flush_literal(&mut self) {
        if let Some((position, digits)) = self.pending.take() {
            self.tokens
                .push(PositionedToken::new(FilterToken::Literal(digits), position));
        }
    }

    /// Consumes the whole input and returns the tokens in source order.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::MalformedToken` for the first unrecognised character.
    pub fn tokenize(mut self) -> FilterResult<Vec<PositionedToken>> {
        while let Some((position, c)) = self.chars.next() {
            match c {
                ' ' | '\t' => self.flush_literal(),
                '0'..='9' => match &mut self.pending {
                    Some((_, digits)) => digits.push(c),
                    None => self.pending = Some((position, c.to_string())),
                },
                _ => {
                    let token = FilterToken::from_symbol(c)
                        .ok_or_else(|| FilterError::malformed_token(c, position))?;
                    self.flush_literal();
                    self.tokens.push(PositionedToken::new(token, position));
                }
            }
        }
        self.flush_literal();
        Ok(self.tokens)
    }
}

/// Tokenizes a filter expression.
///
/// An empty or all-whitespace input yields an empty vector.
pub fn tokenize(input: &str) -> FilterResult<Vec<PositionedToken>> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<FilterToken> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|pt| pt.token)
            .collect()
    }

    fn lit(text: &str) -> FilterToken {
        FilterToken::Literal(text.to_string())
    }

    #[test]
    fn test_tokenize_single_literal() {
        assert_eq!(kinds("42"), vec![lit("42")]);
    }

    #[test]
    fn test_tokenize_operators() {
        assert_eq!(
            kinds("1&2|!3"),
            vec![
                lit("1"),
                FilterToken::And,
                lit("2"),
                FilterToken::Or,
                FilterToken::Not,
                lit("3"),
            ]
        );
    }

    #[test]
    fn test_tokenize_parentheses() {
        assert_eq!(
            kinds("(10 | 20) & 30"),
            vec![
                FilterToken::OpenParen,
                lit("10"),
                FilterToken::Or,
                lit("20"),
                FilterToken::CloseParen,
                FilterToken::And,
                lit("30"),
            ]
        );
    }

    #[test]
    fn test_tokenize_skips_spaces_and_tabs() {
        assert_eq!(kinds(" \t7\t&  8 "), vec![lit("7"), FilterToken::And, lit("8")]);
    }

    #[test]
    fn test_whitespace_splits_literals() {
        assert_eq!(kinds("1 2"), vec![lit("1"), lit("2")]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(kinds("").is_empty());
        assert!(kinds("   \t ").is_empty());
    }

    #[test]
    fn test_token_positions() {
        let tokens = tokenize("12 & !345").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|pt| pt.position).collect();
        assert_eq!(positions, vec![0, 3, 5, 6]);
    }

    #[test]
    fn test_malformed_character() {
        assert_eq!(
            tokenize("1 $ 2"),
            Err(FilterError::malformed_token('$', 2))
        );
    }

    #[test]
    fn test_newline_is_malformed() {
        assert_eq!(tokenize("1\n"), Err(FilterError::malformed_token('\n', 1)));
    }

    #[test]
    fn test_letters_and_signs_are_malformed() {
        assert!(matches!(
            tokenize("a"),
            Err(FilterError::MalformedToken { character: 'a', .. })
        ));
        assert!(matches!(
            tokenize("-1"),
            Err(FilterError::MalformedToken { character: '-', .. })
        ));
    }

    #[test]
    fn test_multibyte_position() {
        assert_eq!(
            tokenize("1 é"),
            Err(FilterError::malformed_token('é', 2))
        );
    }

    #[test]
    fn test_precedence_order() {
        let or = FilterToken::Or.precedence().unwrap();
        let and = FilterToken::And.precedence().unwrap();
        let not = FilterToken::Not.precedence().unwrap();
        assert!(or < and && and < not);
        assert_eq!(FilterToken::OpenParen.precedence(), None);
        assert_eq!(lit("1").precedence(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(FilterToken::And.to_string(), "&");
        assert_eq!(lit("17").to_string(), "17");
    }
}
