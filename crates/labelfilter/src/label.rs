//! Label values and the collections they are looked up in.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

use super::error::{FilterError, FilterResult};

/// A value that can appear as a literal in a filter expression.
///
/// Literals are digit runs. The default [`from_literal`](Label::from_literal)
/// parses them as a signed 64-bit integer and hands the value to
/// [`from_number`](Label::from_number); types that want the raw text (such as
/// `String`) override `from_literal` instead.
pub trait Label: PartialEq + Sized {
    /// Converts a parsed literal into a label.
    fn from_number(value: i64) -> FilterResult<Self>;

    /// Converts the literal text into a label.
    fn from_literal(literal: &str) -> FilterResult<Self> {
        let value: i64 = literal
            .parse()
            .map_err(|e| FilterError::numeric_parse(literal, e))?;
        Self::from_number(value)
    }
}

macro_rules! impl_integer_label {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Label for $ty {
                fn from_number(value: i64) -> FilterResult<Self> {
                    <$ty>::try_from(value).map_err(|e| FilterError::numeric_parse(value.to_string(), e))
                }
            }
        )*
    };
}

impl_integer_label!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Label for String {
    fn from_number(value: i64) -> FilterResult<Self> {
        Ok(value.to_string())
    }

    fn from_literal(literal: &str) -> FilterResult<Self> {
        Ok(literal.to_string())
    }
}

/// A collection of labels attached to one item.
///
/// Only membership matters: order and duplicates are ignored.
pub trait LabelSet<T> {
    /// Returns true if `label` is in the collection.
    fn contains_label(&self, label: &T) -> bool;
}

impl<T: PartialEq> LabelSet<T> for [T] {
    fn contains_label(&self, label: &T) -> bool {
        self.contains(label)
    }
}

impl<T: PartialEq, const N: usize> LabelSet<T> for [T; N] {
    fn contains_label(&self, label: &T) -> bool {
        self.contains(label)
    }
}

impl<T: PartialEq> LabelSet<T> for Vec<T> {
    fn contains_label(&self, label: &T) -> bool {
        self.contains(label)
    }
}

impl<T: PartialEq> LabelSet<T> for VecDeque<T> {
    fn contains_label(&self, label: &T) -> bool {
        self.contains(label)
    }
}

impl<T: Eq + Hash, S: BuildHasher> LabelSet<T> for HashSet<T, S> {
    fn contains_label(&self, label: &T) -> bool {
        self.contains(label)
    }
}

impl<T: Ord> LabelSet<T> for BTreeSet<T> {
    fn contains_label(&self, label: &T) -> bool {
        self.contains(label)
    }
}

impl<T, L: LabelSet<T> + ?Sized> LabelSet<T> for &L {
    fn contains_label(&self, label: &T) -> bool {
        (**self).contains_label(label)
    }
}
