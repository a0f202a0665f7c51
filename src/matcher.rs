//! The `Matcher` trait and its method-style combinators.

use std::fmt;
use std::sync::Arc;

use crate::{Match, MatchRewrites, Success, Value, rewrite};

/// A strategy for matching values of type `T`.
///
/// Matchers are stateless and shareable across threads; every call to
/// [`Matcher::apply`] builds its own constraints.
pub trait Matcher<T>: Send + Sync {
    fn apply(&self, value: &T) -> Match<T>;
}

/// Boxed matcher, for lists of matchers with different concrete types.
pub type BoxMatcher<T> = Box<dyn Matcher<T>>;

impl<T, M: Matcher<T> + ?Sized> Matcher<T> for Box<M> {
    fn apply(&self, value: &T) -> Match<T> {
        (**self).apply(value)
    }
}

impl<T, M: Matcher<T> + ?Sized> Matcher<T> for Arc<M> {
    fn apply(&self, value: &T) -> Match<T> {
        (**self).apply(value)
    }
}

impl<T, M: Matcher<T> + ?Sized> Matcher<T> for &M {
    fn apply(&self, value: &T) -> Match<T> {
        (**self).apply(value)
    }
}

/// Wrap a closure as a [`Matcher`].
pub fn from_fn<T, F>(f: F) -> FnMatcher<F>
where
    F: Fn(&T) -> Match<T> + Send + Sync,
{
    FnMatcher { f }
}

/// Matcher returned by [`from_fn`].
pub struct FnMatcher<F> {
    f: F,
}

impl<T, F> Matcher<T> for FnMatcher<F>
where
    F: Fn(&T) -> Match<T> + Send + Sync,
{
    fn apply(&self, value: &T) -> Match<T> {
        (self.f)(value)
    }
}

impl<F> fmt::Debug for FnMatcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnMatcher(<function>)")
    }
}

/// Matcher returned by [`MatcherExt::or`].
#[derive(Debug)]
pub struct Or<L, R> {
    left: L,
    right: R,
}

impl<T, L: Matcher<T>, R: Matcher<T>> Matcher<T> for Or<L, R> {
    fn apply(&self, value: &T) -> Match<T> {
        // Leftmost success wins; the left branch's bindings are not reconciled
        // with anything the right branch would have produced.
        match self.left.apply(value) {
            Match::Failure => self.right.apply(value),
            success => success,
        }
    }
}

/// Combinators available on every matcher.
pub trait MatcherExt<T: Value>: Matcher<T> {
    /// Try `self`, falling back to `alternative` when it fails.
    fn or<R: Matcher<T>>(self, alternative: R) -> Or<Self, R>
    where
        Self: Sized,
    {
        Or { left: self, right: alternative }
    }

    fn boxed(self) -> BoxMatcher<T>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }

    /// Match `value` and, on success, rebuild it with the overrides chosen by
    /// `rewrite_builder`. `None` means nothing matched.
    fn rewrite(&self, value: &T, rewrite_builder: impl FnOnce(&Success<T>, &mut MatchRewrites)) -> Option<T> {
        rewrite::rewrite_once(value, self, rewrite_builder)
    }

    /// Rewrite until the matcher stops matching; see [`rewrite_to_fixpoint`](crate::rewrite_to_fixpoint).
    fn rewrite_all(&self, value: T, rewrite_builder: impl FnMut(&Success<T>, &mut MatchRewrites)) -> T {
        rewrite::rewrite_to_fixpoint(value, self, rewrite_builder)
    }
}

impl<T: Value, M: Matcher<T> + ?Sized> MatcherExt<T> for M {}
