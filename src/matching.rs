//! Match results and the algebra combinators use to build them.
//!
//! A [`Match`] is either `Failure` or a [`Success`] pairing a rebuild closure
//! with the constraints collected while matching. Successes only ever hold
//! valid constraints: every constructor here checks validity and returns
//! `Failure` instead of a success with conflicting bindings.
//!
//! The rebuild closure reconstructs the matched value. Closures nest the same
//! way matchers do, so rebuilding the root rebuilds every matched child under
//! the same [`MatchRewrites`], and a capture with an override short-circuits
//! its whole subtree.

use std::fmt;
use std::sync::Arc;

use crate::{Capture, Constraints, Error, MatchRewrites, Result, Value};

/// Shared closure that rebuilds a matched value under a set of overrides.
pub type Rebuilder<T> = Arc<dyn Fn(&MatchRewrites) -> T + Send + Sync>;

/// Outcome of applying a matcher to a value.
pub enum Match<T> {
    Failure,
    Success(Success<T>),
}

/// Successful match: a rebuild closure and valid constraints.
pub struct Success<T> {
    rebuilder: Rebuilder<T>,
    constraints: Constraints,
}

impl<T> Success<T> {
    /// Rebuild the matched value, applying any overrides in `rewrites`.
    pub fn rebuild(&self, rewrites: &MatchRewrites) -> T {
        (self.rebuilder)(rewrites)
    }

    /// Value bound to `capture` by this match.
    pub fn value<V: Value>(&self, capture: &Capture<V>) -> Result<V> {
        self.constraints.value(capture)
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }
}

impl<T> Clone for Success<T> {
    fn clone(&self) -> Self {
        Success { rebuilder: Arc::clone(&self.rebuilder), constraints: self.constraints.clone() }
    }
}

impl<T> fmt::Debug for Success<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Success").field("constraints", &self.constraints).finish_non_exhaustive()
    }
}

impl<T> Clone for Match<T> {
    fn clone(&self) -> Self {
        match self {
            Match::Failure => Match::Failure,
            Match::Success(success) => Match::Success(success.clone()),
        }
    }
}

impl<T> fmt::Debug for Match<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Match::Failure => f.write_str("Failure"),
            Match::Success(success) => success.fmt(f),
        }
    }
}

impl<T> Match<T> {
    pub fn failure() -> Self {
        Match::Failure
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Match::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Match::Failure)
    }

    pub fn success(&self) -> Option<&Success<T>> {
        match self {
            Match::Success(success) => Some(success),
            Match::Failure => None,
        }
    }

    pub fn into_success(self) -> Option<Success<T>> {
        match self {
            Match::Success(success) => Some(success),
            Match::Failure => None,
        }
    }

    /// Constraints of this match; a failure reports invalid constraints.
    pub fn constraints(&self) -> Constraints {
        match self {
            Match::Success(success) => success.constraints.clone(),
            Match::Failure => Constraints::invalid(),
        }
    }

    /// Value bound to `capture`.
    pub fn value<V: Value>(&self, capture: &Capture<V>) -> Result<V> {
        match self {
            Match::Success(success) => success.value(capture),
            Match::Failure => Err(Error::FailedMatch { operation: "get a capture value" }),
        }
    }

    /// Rebuild the matched value, applying any overrides in `rewrites`.
    pub fn rebuild(&self, rewrites: &MatchRewrites) -> Result<T> {
        match self {
            Match::Success(success) => Ok(success.rebuild(rewrites)),
            Match::Failure => Err(Error::FailedMatch { operation: "rebuild" }),
        }
    }

    /// Continue with `f` on success; failures pass through untouched.
    pub fn and_then(self, f: impl FnOnce(Success<T>) -> Match<T>) -> Match<T> {
        match self {
            Match::Success(success) => f(success),
            Match::Failure => Match::Failure,
        }
    }

    /// Let `rewrite_builder` fill a fresh override table and rebuild with it.
    ///
    /// Returns `None` for a failed match.
    pub fn rewrite(&self, rewrite_builder: impl FnOnce(&Success<T>, &mut MatchRewrites)) -> Option<T> {
        let success = self.success()?;
        let mut rewrites = MatchRewrites::new();
        rewrite_builder(success, &mut rewrites);
        Some(success.rebuild(&rewrites))
    }
}

impl<T: Value> Match<T> {
    /// Success with `constraints` if they are valid, otherwise failure.
    pub fn from_rebuilder(
        rebuilder: impl Fn(&MatchRewrites) -> T + Send + Sync + 'static,
        constraints: Constraints,
    ) -> Self {
        if constraints.is_valid() {
            Match::Success(Success { rebuilder: Arc::new(rebuilder), constraints })
        } else {
            Match::Failure
        }
    }

    /// Success without bindings that always rebuilds to `value`.
    pub fn from_value(value: T) -> Self {
        Self::from_rebuilder(move |_| value.clone(), Constraints::empty())
    }

    /// Bind `capture` to `value` on top of `base`.
    ///
    /// Rebuild returns the override for `capture` when one is present and
    /// falls back to `default_rebuilder` otherwise. Fails if the new binding
    /// conflicts with `base`.
    pub fn from_capture(
        capture: &Capture<T>,
        value: T,
        default_rebuilder: impl Fn(&MatchRewrites) -> T + Send + Sync + 'static,
        base: &Constraints,
    ) -> Self {
        let constraints = base.merge(&Constraints::for_capture(capture, value));
        let capture = capture.clone();
        Self::from_rebuilder(
            move |rewrites| rewrites.replaced_value(&capture).unwrap_or_else(|| default_rebuilder(rewrites)),
            constraints,
        )
    }

    /// Transform the rebuilt value. Constraints and failure are preserved.
    pub fn map<U: Value>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> Match<U> {
        match self {
            Match::Success(success) => {
                let Success { rebuilder, constraints } = success;
                Match::Success(Success {
                    rebuilder: Arc::new(move |rewrites: &MatchRewrites| f(rebuilder(rewrites))),
                    constraints,
                })
            }
            Match::Failure => Match::Failure,
        }
    }

    /// One-field form of the `combineN` family.
    pub fn combine1<A: Value>(ctor: impl Fn(A) -> T + Send + Sync + 'static, m1: Match<A>) -> Self {
        m1.map(ctor)
    }

    impl_combine!(
        /// Combine two matches into a value built by `ctor`.
        combine2 => m1: A, m2: B
    );

    impl_combine!(
        /// Combine three matches into a value built by `ctor`.
        combine3 => m1: A, m2: B, m3: C
    );

    impl_combine!(
        /// Combine four matches into a value built by `ctor`.
        combine4 => m1: A, m2: B, m3: C, m4: D
    );

    /// Rebuild every element match in order and pass the list to `builder`.
    pub fn from_list_with<V: Value>(
        builder: impl Fn(Vec<V>) -> T + Send + Sync + 'static,
        matches: impl IntoIterator<Item = Match<V>>,
    ) -> Self {
        let Some(successes) = collect_successes(matches) else {
            return Match::Failure;
        };
        let constraints = Constraints::merge_all(successes.iter().map(Success::constraints));
        Self::from_rebuilder(move |rewrites| builder(rebuild_all(&successes, rewrites)), constraints)
    }

    /// Like [`Match::from_list_with`], with one extra match rebuilt after the list.
    pub fn from_list_and<V: Value, W: Value>(
        builder: impl Fn(Vec<V>, W) -> T + Send + Sync + 'static,
        matches: impl IntoIterator<Item = Match<V>>,
        other: Match<W>,
    ) -> Self {
        let Match::Success(other) = other else {
            return Match::Failure;
        };
        let Some(successes) = collect_successes(matches) else {
            return Match::Failure;
        };
        let constraints =
            Constraints::merge_all(successes.iter().map(Success::constraints).chain([other.constraints()]));
        Self::from_rebuilder(
            move |rewrites| builder(rebuild_all(&successes, rewrites), other.rebuild(rewrites)),
            constraints,
        )
    }
}

impl<T: Value> Match<Vec<T>> {
    /// List of element matches rebuilt in their original order.
    pub fn from_list(matches: impl IntoIterator<Item = Match<T>>) -> Self {
        Self::from_list_with(|values| values, matches)
    }
}

fn collect_successes<V>(matches: impl IntoIterator<Item = Match<V>>) -> Option<Vec<Success<V>>> {
    matches.into_iter().map(Match::into_success).collect()
}

pub(crate) fn rebuild_all<V>(matches: &[Success<V>], rewrites: &MatchRewrites) -> Vec<V> {
    matches.iter().map(|m| m.rebuild(rewrites)).collect()
}
