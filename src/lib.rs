//! Structural pattern matching and rewriting for immutable trees.
//!
//! A [`Matcher`] recognizes a shape in a value. [`Capture`]s mark positions
//! whose values are bound during a match; sharing one capture between two
//! positions forces those positions to hold equal values. A successful
//! [`Match`] exposes the bound values and can rebuild the matched value with
//! selected captures replaced through a [`MatchRewrites`] table.
//!
//! ```text
//! matcher.apply(&value) ──> Match::Failure
//!                      └──> Match::Success ── value(&capture)
//!                                        └── rebuild(&rewrites) ──> new value
//! ```
//!
//! [`rewrite_to_fixpoint`] repeats match and rebuild until the matcher stops
//! matching. It does not detect cycles: a rule that keeps matching its own
//! output loops forever unless the caller bounds it with
//! [`RewriteOptions::max_iterations`].
//!
//! # Example
//! ```
//! use joinery::{Capture, contains, is_equal, rewrite_to_fixpoint};
//!
//! let seven = Capture::named("seven");
//! let matcher = contains(seven.save(is_equal(7)));
//!
//! let out = rewrite_to_fixpoint(vec![7, 1, 7], &matcher, |_, rewrites| {
//!     rewrites.replace_value(&seven, 0);
//! });
//! assert_eq!(out, vec![0, 1, 0]);
//! ```

use std::fmt;

#[macro_use]
mod macros;
mod capture;
mod constraints;
mod error;
mod matcher;
mod matchers;
mod matching;
mod rewrite;
mod rewrites;
mod variant;

pub use capture::{Capture, CaptureId, Save};
pub use constraints::Constraints;
pub use error::{Error, Result};
pub use matcher::{BoxMatcher, FnMatcher, Matcher, MatcherExt, Or, from_fn};
pub use matchers::{
    Contains, List, ListWithConsecutive, ListWithPrefix, Required, any, contains, is_equal, list,
    list_with_consecutive, list_with_prefix, matches_regex, predicate, required,
};
pub use matching::{Match, Rebuilder, Success};
pub use rewrite::{
    RewriteMetrics, RewriteOptions, RewriteRun, StepMetrics, rewrite_once, rewrite_to_fixpoint,
    rewrite_to_fixpoint_with,
};
pub use rewrites::MatchRewrites;
// Used by `regex!` at the call site.
#[doc(hidden)]
pub use ::once_cell;
#[doc(hidden)]
pub use ::regex;
pub use variant::{Matchable1, Matchable2, Matchable3, Matchable4, Narrow, Variant, is_variant, narrow};

/// Values that can be matched, bound to captures and rebuilt.
///
/// Bindings are compared with `PartialEq` when constraints merge, and every
/// value may end up inside a rebuild closure shared between threads.
pub trait Value: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T> Value for T where T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}
