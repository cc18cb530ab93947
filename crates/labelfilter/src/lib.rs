//! Boolean label filters.
//!
//! This crate compiles a logic expression over integer labels, such as
//! `1 & (2 | !3)`, into a predicate tree and tests label sets against it.
//! Compilation runs in three stages, each exposed for direct use:
//!
//! 1. [`tokenize`] splits the expression into [`FilterToken`]s.
//! 2. [`to_postfix`] reorders them into postfix form by operator precedence.
//! 3. [`build_tree`] turns the postfix sequence into a [`Predicate`].
//!
//! [`LabelFilter`] runs all three and keeps the result.
//!
//! # Supported Syntax
//!
//! - `42` - Items carrying label 42
//! - `&` - AND
//! - `|` - OR
//! - `!` - NOT
//! - `()` - Grouping
//!
//! `!` binds tightest, then `&`, then `|`. Spaces and tabs are ignored.
//! `!` is prefix only: `1!` is rejected. Compiled trees nest at most
//! [`MAX_DEPTH`] levels.
//!
//! # Example
//!
//! ```
//! use labelfilter::{FilterError, LabelFilter};
//!
//! let filter: LabelFilter<u32> = LabelFilter::new("1 | 2 & 3").unwrap();
//! assert!(filter.check(&[2, 3]));
//! assert!(!filter.check(&[2]));
//!
//! let err = LabelFilter::<u32>::new("1 2").unwrap_err();
//! assert_eq!(err, FilterError::TrailingOperand { count: 2 });
//! ```

mod ast;
mod builder;
mod error;
mod filter;
mod label;
mod lexer;
mod postfix;

pub use ast::Predicate;
pub use builder::{build_tree, MAX_DEPTH};
pub use error::{FilterError, FilterResult};
pub use filter::LabelFilter;
pub use label::{Label, LabelSet};
pub use lexer::{tokenize, FilterToken, Lexer, PositionedToken};
pub use postfix::{format_postfix, to_postfix};
