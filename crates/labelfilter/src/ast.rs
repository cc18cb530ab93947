//! Abstract Syntax Tree (AST) for filter expressions.

use std::fmt;

use super::label::LabelSet;

/// A compiled filter expression.
///
/// Each node owns its children, so dropping the root releases the whole tree.
/// Evaluation takes `&self` and never mutates, so a tree can be shared between
/// threads and checked concurrently.
///
/// [`check`](Predicate::check), [`labels`](Predicate::labels), the size
/// queries and `Display` walk the tree iteratively. Drop, `Clone`, `Debug`
/// and equality recurse once per level; trees compiled from an expression are
/// at most [`MAX_DEPTH`](crate::MAX_DEPTH) levels deep.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Predicate<T> {
    /// Logical OR of two predicates.
    Or(Box<Predicate<T>>, Box<Predicate<T>>),

    /// Logical AND of two predicates.
    And(Box<Predicate<T>>, Box<Predicate<T>>),

    /// Logical NOT of a predicate.
    Not(Box<Predicate<T>>),

    /// Matches label sets containing this value.
    Label(T),
}

impl<T> Predicate<T> {
    /// Creates a label leaf.
    pub fn label(value: T) -> Self {
        Predicate::Label(value)
    }

    /// Creates an AND predicate from two predicates.
    ///
    /// # Example
    ///
    /// ```
    /// use labelfilter::Predicate;
    ///
    /// let predicate = Predicate::and(Predicate::label(1), Predicate::label(2));
    /// assert!(matches!(predicate, Predicate::And(_, _)));
    /// ```
    pub fn and(left: Predicate<T>, right: Predicate<T>) -> Self {
        Predicate::And(Box::new(left), Box::new(right))
    }

    /// Creates an OR predicate from two predicates.
    ///
    /// # Example
    ///
    /// ```
    /// use labelfilter::Predicate;
    ///
    /// let predicate = Predicate::or(Predicate::label(1), Predicate::label(2));
    /// assert!(matches!(predicate, Predicate::Or(_, _)));
    /// ```
    pub fn or(left: Predicate<T>, right: Predicate<T>) -> Self {
        Predicate::Or(Box::new(left), Box::new(right))
    }

    /// Creates a NOT predicate from another predicate.
    pub fn negate(inner: Predicate<T>) -> Self {
        Predicate::Not(Box::new(inner))
    }

    /// Returns true if `labels` satisfies this predicate.
    ///
    /// `And` skips its right side when the left is false and `Or` skips it
    /// when the left is true. Evaluation runs on an explicit work stack, so
    /// the depth of the tree is not limited by the call stack.
    ///
    /// # Example
    ///
    /// ```
    /// use labelfilter::Predicate;
    ///
    /// let predicate = Predicate::and(Predicate::label(1), Predicate::negate(Predicate::label(3)));
    /// assert!(predicate.check(&[1, 2]));
    /// assert!(!predicate.check(&[1, 3]));
    /// ```
    pub fn check<S>(&self, labels: &S) -> bool
    where
        S: LabelSet<T> + ?Sized,
    {
        let mut work: Vec<Step<'_, T>> = vec![Step::Visit(self)];
        let mut result = false;

        while let Some(step) = work.pop() {
            match step {
                Step::Visit(Predicate::Label(value)) => result = labels.contains_label(value),
                Step::Visit(Predicate::Not(inner)) => {
                    work.push(Step::Invert);
                    work.push(Step::Visit(&**inner));
                }
                Step::Visit(Predicate::And(left, right)) => {
                    work.push(Step::AndThen(&**right));
                    work.push(Step::Visit(&**left));
                }
                Step::Visit(Predicate::Or(left, right)) => {
                    work.push(Step::OrElse(&**right));
                    work.push(Step::Visit(&**left));
                }
                Step::Invert => result = !result,
                Step::AndThen(right) => {
                    if result {
                        work.push(Step::Visit(right));
                    }
                }
                Step::OrElse(right) => {
                    if !result {
                        work.push(Step::Visit(right));
                    }
                }
            }
        }

        result
    }

    /// Returns the label values referenced by the tree, left to right.
    pub fn labels(&self) -> Vec<&T> {
        let mut out = Vec::new();
        let mut pending: Vec<&Predicate<T>> = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                Predicate::Or(left, right) | Predicate::And(left, right) => {
                    pending.push(right);
                    pending.push(left);
                }
                Predicate::Not(inner) => pending.push(inner),
                Predicate::Label(value) => out.push(value),
            }
        }
        out
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending: Vec<&Predicate<T>> = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            match node {
                Predicate::Or(left, right) | Predicate::And(left, right) => {
                    pending.push(left);
                    pending.push(right);
                }
                Predicate::Not(inner) => pending.push(inner),
                Predicate::Label(_) => {}
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path, counting both ends.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Predicate<T>, usize)> = vec![(self, 1)];
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            match node {
                Predicate::Or(left, right) | Predicate::And(left, right) => {
                    pending.push((&**left, level + 1));
                    pending.push((&**right, level + 1));
                }
                Predicate::Not(inner) => pending.push((&**inner, level + 1)),
                Predicate::Label(_) => {}
            }
        }
        deepest
    }
}

/// One pending action of [`Predicate::check`].
enum Step<'a, T> {
    /// Evaluate a subtree, leaving its value in the result.
    Visit(&'a Predicate<T>),
    /// Negate the result.
    Invert,
    /// Evaluate the right side of an `And` only if the left was true.
    AndThen(&'a Predicate<T>),
    /// Evaluate the right side of an `Or` only if the left was false.
    OrElse(&'a Predicate<T>),
}

/// A piece of the infix rendering still to be written.
enum Piece<'a, T> {
    Node(&'a Predicate<T>),
    Text(&'static str),
}

/// Formats the tree as infix with every binary node parenthesised,
/// e.g. `(1 | (2 & !3))`.
impl<T: fmt::Display> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending: Vec<Piece<'_, T>> = vec![Piece::Node(self)];
        while let Some(piece) = pending.pop() {
            let (left, operator, right) = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(Predicate::Label(value)) => {
                    write!(f, "{value}")?;
                    continue;
                }
                Piece::Node(Predicate::Not(inner)) => {
                    f.write_str("!")?;
                    pending.push(Piece::Node(&**inner));
                    continue;
                }
                Piece::Node(Predicate::Or(left, right)) => (left, " | ", right),
                Piece::Node(Predicate::And(left, right)) => (left, " & ", right),
            };
            f.write_str("(")?;
            pending.push(Piece::Text(")"));
            pending.push(Piece::Node(&**right));
            pending.push(Piece::Text(operator));
            pending.push(Piece::Node(&**left));
        }
        Ok(())
    }
}
