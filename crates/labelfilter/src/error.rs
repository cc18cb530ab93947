//! Error types for filter compilation.

use thiserror::Error;

/// A specialized Result type for filter compilation.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while compiling a filter expression.
///
/// Every error is raised during construction. Once a [`LabelFilter`] exists,
/// evaluating it cannot fail.
///
/// [`LabelFilter`]: crate::LabelFilter
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The expression contains no tokens.
    #[error("filter expression is empty")]
    EmptyExpression,

    /// A character that is not whitespace, an operator, a parenthesis or a digit,
    /// or a closing parenthesis with no matching opening one.
    #[error("malformed token '{character}' at position {position}")]
    MalformedToken {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the expression.
        position: usize,
    },

    /// A literal could not be converted into the label type.
    #[error("invalid label literal '{literal}': {reason}")]
    NumericParse {
        /// The literal text.
        literal: String,
        /// Why the conversion failed.
        reason: String,
    },

    /// An operator was reached with fewer operands than it needs.
    #[error("operator '{operator}' at position {position} is missing an operand")]
    StackUnderflow {
        /// The operator symbol.
        operator: char,
        /// Byte offset of the operator in the expression.
        position: usize,
    },

    /// More than one independent sub-expression remained after parsing,
    /// e.g. two labels with no operator between them.
    #[error("extra label: {count} sub-expressions are not joined by an operator")]
    TrailingOperand {
        /// How many roots were left on the stack.
        count: usize,
    },

    /// An opening parenthesis was never closed.
    #[error("unclosed parenthesis at position {position}")]
    UnclosedParenthesis {
        /// Byte offset of the `(`.
        position: usize,
    },

    /// The predicate tree would nest deeper than [`MAX_DEPTH`] levels.
    ///
    /// [`MAX_DEPTH`]: crate::MAX_DEPTH
    #[error("expression nests deeper than {limit} levels at position {position}")]
    NestingTooDeep {
        /// Byte offset of the operator that crossed the limit.
        position: usize,
        /// The depth limit.
        limit: usize,
    },
}

impl FilterError {
    /// Creates a malformed token error.
    pub fn malformed_token(character: char, position: usize) -> Self {
        FilterError::MalformedToken {
            character,
            position,
        }
    }

    /// Creates a numeric parse error.
    pub fn numeric_parse(literal: impl Into<String>, reason: impl ToString) -> Self {
        FilterError::NumericParse {
            literal: literal.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a stack underflow error.
    pub fn stack_underflow(operator: char, position: usize) -> Self {
        FilterError::StackUnderflow { operator, position }
    }

    /// Returns the byte offset the error points at, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            FilterError::MalformedToken { position, .. }
            | FilterError::StackUnderflow { position, .. }
            | FilterError::UnclosedParenthesis { position }
            | FilterError::NestingTooDeep { position, .. } => Some(*position),
            FilterError::EmptyExpression
            | FilterError::NumericParse { .. }
            | FilterError::TrailingOperand { .. } => None,
        }
    }
}
