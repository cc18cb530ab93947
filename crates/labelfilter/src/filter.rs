//! Compiled filters that own their expression and predicate tree.

use std::fmt;
use std::str::FromStr;

use super::ast::Predicate;
use super::builder::build_tree;
use super::error::{FilterError, FilterResult};
use super::label::{Label, LabelSet};
use super::lexer::tokenize;
use super::postfix::{format_postfix, to_postfix};

/// A filter expression compiled into a predicate tree.
///
/// The tree is built once in [`LabelFilter::new`] and never changes afterwards.
/// `LabelFilter<T>` is `Send + Sync` whenever `T` is, so one filter can be
/// checked from many threads at once.
///
/// # Example
///
/// ```
/// use labelfilter::LabelFilter;
///
/// let filter: LabelFilter<i32> = LabelFilter::new("1 & (2 | !3)").unwrap();
/// assert!(filter.check(&[1, 2]));
/// assert!(filter.check(&[1]));
/// assert!(!filter.check(&[1, 3]));
/// assert!(!filter.check(&[2]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFilter<T> {
    expression: String,
    root: Predicate<T>,
}

impl<T: Label> LabelFilter<T> {
    /// Compiles a filter expression.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::MalformedToken` for characters outside the grammar
    /// and for a `)` without a matching `(`.
    ///
    /// Returns `FilterError::EmptyExpression` if the input holds no tokens.
    ///
    /// Returns `FilterError::StackUnderflow`, `FilterError::TrailingOperand` or
    /// `FilterError::UnclosedParenthesis` if the tokens do not form a single
    /// expression, and `FilterError::NumericParse` if a literal does not fit `T`.
    ///
    /// Returns `FilterError::NestingTooDeep` if the tree would be deeper than
    /// [`MAX_DEPTH`](crate::MAX_DEPTH).
    pub fn new(expression: &str) -> FilterResult<Self> {
        let tokens = tokenize(expression)?;
        if tokens.is_empty() {
            return Err(FilterError::EmptyExpression);
        }
        log::debug!("tokenized {:?} into {} tokens", expression, tokens.len());

        let postfix = to_postfix(tokens)?;
        log::debug!("postfix form of {:?}: {}", expression, format_postfix(&postfix));

        let root = build_tree(postfix)?;
        log::debug!(
            "built predicate for {:?}: {} nodes, depth {}",
            expression,
            root.node_count(),
            root.depth()
        );

        Ok(Self {
            expression: expression.to_string(),
            root,
        })
    }
}

impl<T> LabelFilter<T> {
    /// Returns true if `labels` satisfies the filter.
    pub fn check<S>(&self, labels: &S) -> bool
    where
        S: LabelSet<T> + ?Sized,
    {
        self.root.check(labels)
    }

    /// Returns the label sets that satisfy the filter, in input order.
    pub fn select<'b, S>(&self, items: &'b [S]) -> Vec<&'b S>
    where
        S: LabelSet<T>,
    {
        items.iter().filter(|labels| self.check(*labels)).collect()
    }

    /// The source expression, as given to [`LabelFilter::new`].
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The root of the predicate tree.
    pub fn predicate(&self) -> &Predicate<T> {
        &self.root
    }

    /// Consumes the filter and returns its predicate tree.
    pub fn into_predicate(self) -> Predicate<T> {
        self.root
    }
}

impl<T: Label> FromStr for LabelFilter<T> {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<T> fmt::Display for LabelFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}
