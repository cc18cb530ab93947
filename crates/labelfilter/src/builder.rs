//! Predicate tree construction from postfix tokens.

use super::ast::Predicate;
use super::error::{FilterError, FilterResult};
use super::label::Label;
use super::lexer::{FilterToken, PositionedToken};

/// Deepest predicate tree [`build_tree`] will produce, counting the root and
/// the leaf.
///
/// A chain such as `1 & 2 & … & n` nests one level per operator.
pub const MAX_DEPTH: usize = 1024;

/// Builds a predicate tree from a postfix token sequence.
///
/// # Errors
///
/// - `FilterError::NumericParse` if a literal does not fit the label type.
/// - `FilterError::StackUnderflow` if an operator lacks operands.
/// - `FilterError::UnclosedParenthesis` if a `(` was left in the sequence.
/// - `FilterError::NestingTooDeep` if the tree would exceed [`MAX_DEPTH`].
/// - `FilterError::TrailingOperand` if more than one tree remains.
/// - `FilterError::EmptyExpression` if the sequence is empty.
pub fn build_tree<T: Label>(postfix: Vec<PositionedToken>) -> FilterResult<Predicate<T>> {
    // Each entry carries the depth of its subtree.
    let mut stack: Vec<(Predicate<T>, usize)> = Vec::new();

    for PositionedToken { token, position } in postfix {
        match token {
            FilterToken::Literal(text) => {
                stack.push((Predicate::label(T::from_literal(&text)?), 1));
            }
            FilterToken::Or | FilterToken::And => {
                let operator = if token == FilterToken::Or { '|' } else { '&' };
                let (right, right_depth) = stack
                    .pop()
                    .ok_or(FilterError::stack_underflow(operator, position))?;
                let (left, left_depth) = stack
                    .pop()
                    .ok_or(FilterError::stack_underflow(operator, position))?;
                let depth = nested_depth(left_depth.max(right_depth), position)?;
                let node = if token == FilterToken::Or {
                    Predicate::or(left, right)
                } else {
                    Predicate::and(left, right)
                };
                stack.push((node, depth));
            }
            FilterToken::Not => {
                let (inner, inner_depth) = stack
                    .pop()
                    .ok_or(FilterError::stack_underflow('!', position))?;
                let depth = nested_depth(inner_depth, position)?;
                stack.push((Predicate::negate(inner), depth));
            }
            FilterToken::OpenParen => return Err(FilterError::UnclosedParenthesis { position }),
            FilterToken::CloseParen => return Err(FilterError::malformed_token(')', position)),
        }
    }

    match stack.len() {
        0 => Err(FilterError::EmptyExpression),
        1 => stack
            .pop()
            .map(|(root, _)| root)
            .ok_or(FilterError::EmptyExpression),
        count => Err(FilterError::TrailingOperand { count }),
    }
}

/// Depth of a new node over a child of depth `child`.
fn nested_depth(child: usize, position: usize) -> FilterResult<usize> {
    let depth = child + 1;
    if depth > MAX_DEPTH {
        return Err(FilterError::NestingTooDeep {
            position,
            limit: MAX_DEPTH,
        });
    }
    Ok(depth)
}
