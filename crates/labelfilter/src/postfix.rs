//! Infix to postfix (reverse Polish) conversion.
//!
//! This is the shunting-yard algorithm: literals go straight to the output,
//! operators wait on a stack until an operator of lower precedence, a closing
//! parenthesis or the end of input releases them.

use super::error::{FilterError, FilterResult};
use super::lexer::{FilterToken, PositionedToken};

/// Reorders infix tokens into postfix order.
///
/// Operators of equal precedence pop each other, so `|` and `&` associate to
/// the left. `!` is a prefix operator and never releases an equal one, which
/// keeps `!!1` valid. A `(` still on the stack at the end of input is emitted into the
/// output; the tree builder rejects it.
///
/// # Errors
///
/// Returns `FilterError::MalformedToken` for a `)` with no matching `(`, and
/// for a `!` directly after a literal or `)`, as in `1!`.
///
/// # Example
///
/// ```
/// use labelfilter::{format_postfix, to_postfix, tokenize};
///
/// let postfix = to_postfix(tokenize("1 | 2 & 3").unwrap()).unwrap();
/// assert_eq!(format_postfix(&postfix), "1 2 3 & |");
/// ```
pub fn to_postfix(tokens: Vec<PositionedToken>) -> FilterResult<Vec<PositionedToken>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<PositionedToken> = Vec::new();

    // True when the previous token closed an operand.
    let mut after_operand = false;

    for positioned in tokens {
        if positioned.token == FilterToken::Not && after_operand {
            return Err(FilterError::malformed_token('!', positioned.position));
        }
        after_operand = matches!(
            positioned.token,
            FilterToken::Literal(_) | FilterToken::CloseParen
        );

        match positioned.token {
            FilterToken::Literal(_) => output.push(positioned),
            FilterToken::OpenParen => operators.push(positioned),
            FilterToken::CloseParen => {
                loop {
                    match operators.pop() {
                        Some(top) if top.token == FilterToken::OpenParen => break,
                        Some(top) => output.push(top),
                        None => {
                            return Err(FilterError::malformed_token(')', positioned.position));
                        }
                    }
                }
            }
            FilterToken::And | FilterToken::Or | FilterToken::Not => {
                let incoming = positioned.token.precedence().unwrap_or(0);
                let prefix = positioned.token == FilterToken::Not;
                while let Some(top) = operators.last() {
                    let releases = match top.token.precedence() {
                        Some(stacked) if prefix => stacked > incoming,
                        Some(stacked) => stacked >= incoming,
                        None => false,
                    };
                    if !releases {
                        break;
                    }
                    if let Some(top) = operators.pop() {
                        output.push(top);
                    }
                }
                operators.push(positioned);
            }
        }
    }

    while let Some(top) = operators.pop() {
        output.push(top);
    }

    Ok(output)
}

/// Renders a token sequence separated by single spaces.
pub fn format_postfix(tokens: &[PositionedToken]) -> String {
    tokens
        .iter()
        .map(|pt| pt.token.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn rpn(input: &str) -> String {
        format_postfix(&to_postfix(tokenize(input).unwrap()).unwrap())
    }

    #[test]
    fn test_single_literal() {
        assert_eq!(rpn("5"), "5");
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        assert_eq!(rpn("1|2&3"), "1 2 3 & |");
        assert_eq!(rpn("1&2|3"), "1 2 & 3 |");
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(rpn("1|2|3"), "1 2 | 3 |");
        assert_eq!(rpn("1&2&3"), "1 2 & 3 &");
    }

    #[test]
    fn test_not_binds_tightest() {
        assert_eq!(rpn("!1&2"), "1 ! 2 &");
        assert_eq!(rpn("1|!2"), "1 2 ! |");
    }

    #[test]
    fn test_double_negation() {
        assert_eq!(rpn("!!1"), "1 ! !");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(rpn("(1|2)&3"), "1 2 | 3 &");
        assert_eq!(rpn("1&(2|3)"), "1 2 3 | &");
        assert_eq!(rpn("!(1&2)"), "1 2 & !");
    }

    #[test]
    fn test_nested_parentheses() {
        assert_eq!(rpn("((1))"), "1");
        assert_eq!(rpn("(1&(2|(3&4)))"), "1 2 3 4 & | &");
    }

    #[test]
    fn test_empty_input() {
        assert!(to_postfix(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_unmatched_close_paren() {
        let tokens = tokenize("1)").unwrap();
        assert_eq!(to_postfix(tokens), Err(FilterError::malformed_token(')', 1)));

        let tokens = tokenize("(1)) & 2").unwrap();
        assert_eq!(to_postfix(tokens), Err(FilterError::malformed_token(')', 3)));
    }

    #[test]
    fn test_postfix_not_is_rejected() {
        let tokens = tokenize("1!").unwrap();
        assert_eq!(to_postfix(tokens), Err(FilterError::malformed_token('!', 1)));

        let tokens = tokenize("1 ! & 2").unwrap();
        assert_eq!(to_postfix(tokens), Err(FilterError::malformed_token('!', 2)));

        let tokens = tokenize("(1)!2").unwrap();
        assert_eq!(to_postfix(tokens), Err(FilterError::malformed_token('!', 3)));
    }

    #[test]
    fn test_not_after_operator_is_prefix() {
        assert_eq!(rpn("1&!2"), "1 2 ! &");
        assert_eq!(rpn("(!1)|!(2)"), "1 ! 2 ! |");
    }

    #[test]
    fn test_stray_open_paren_is_emitted() {
        assert_eq!(rpn("(1"), "1 (");
    }

    #[test]
    fn test_positions_survive_reordering() {
        let postfix = to_postfix(tokenize("1 | 2").unwrap()).unwrap();
        let positions: Vec<usize> = postfix.iter().map(|pt| pt.position).collect();
        assert_eq!(positions, vec![0, 4, 2]);
    }
}
