//! Narrowing sum types to one variant.
//!
//! A [`Variant`] is a named tag check that turns a value of the sum type `S`
//! into the payload `X` of one of its variants, or `None` for any other
//! variant. Matchers built on it fail on the other variants before looking at
//! any field.
//!
//! ```text
//! Expr::Add(l, r) ── Variant("Add") ──> Some((l, r)) ── field matchers ──> Match<Expr>
//! Expr::Num(1)    ── Variant("Add") ──> None         ──────────────────> Failure
//! ```
//!
//! `matchable.rs` holds `Matchable1..4`, which pair a variant with its
//! constructor and field accessors so a match rebuilds the same variant.

use std::fmt;
use std::sync::Arc;

use crate::{Match, Matcher, Value, predicate};

#[path = "variant/matchable.rs"]
mod matchable;

pub use matchable::{Matchable1, Matchable2, Matchable3, Matchable4};

/// Runtime tag check narrowing `S` to the payload `X` of one variant.
pub struct Variant<S, X> {
    name: &'static str,
    narrow: Arc<dyn Fn(&S) -> Option<X> + Send + Sync>,
}

impl<S, X> Variant<S, X> {
    pub fn new(name: &'static str, narrow: impl Fn(&S) -> Option<X> + Send + Sync + 'static) -> Self {
        Variant { name, narrow: Arc::new(narrow) }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Payload of `value` if it is this variant.
    pub fn narrow(&self, value: &S) -> Option<X> {
        (self.narrow)(value)
    }

    pub fn is_instance(&self, value: &S) -> bool {
        self.narrow(value).is_some()
    }
}

impl<S, X> Clone for Variant<S, X> {
    fn clone(&self) -> Self {
        Variant { name: self.name, narrow: Arc::clone(&self.narrow) }
    }
}

impl<S, X> fmt::Debug for Variant<S, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variant({})", self.name)
    }
}

/// Match values of `variant`, delegating the payload to `f`.
pub fn narrow<S, X, F>(variant: Variant<S, X>, f: F) -> Narrow<S, X, F>
where
    F: Fn(&X) -> Match<S> + Send + Sync,
{
    Narrow { variant, f }
}

/// Matcher returned by [`narrow`].
pub struct Narrow<S, X, F> {
    variant: Variant<S, X>,
    f: F,
}

impl<S, X, F> Matcher<S> for Narrow<S, X, F>
where
    F: Fn(&X) -> Match<S> + Send + Sync,
{
    fn apply(&self, value: &S) -> Match<S> {
        match self.variant.narrow(value) {
            Some(payload) => (self.f)(&payload),
            None => Match::Failure,
        }
    }
}

impl<S, X, F> fmt::Debug for Narrow<S, X, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Narrow").field("variant", &self.variant).finish_non_exhaustive()
    }
}

/// Match any value of `variant`. Rebuilds to the input.
pub fn is_variant<S: Value, X: 'static>(variant: Variant<S, X>) -> impl Matcher<S> {
    predicate(move |value: &S| variant.is_instance(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Capture, MatchRewrites, MatcherExt, any};

    #[derive(Debug, Clone, PartialEq)]
    enum Shape {
        Circle(u32),
        Square(u32),
    }

    fn circle() -> Variant<Shape, u32> {
        Variant::new("Circle", |s: &Shape| match s {
            Shape::Circle(r) => Some(*r),
            _ => None,
        })
    }

    #[test]
    fn narrowing_checks_the_tag() {
        let v = circle();

        assert_eq!(v.narrow(&Shape::Circle(3)), Some(3));
        assert_eq!(v.narrow(&Shape::Square(3)), None);
        assert!(v.is_instance(&Shape::Circle(0)));
        assert_eq!(format!("{:?}", v), "Variant(Circle)");
    }

    #[test]
    fn narrow_fails_on_other_variants() {
        let radius: Capture<u32> = Capture::named("radius");
        let r = radius.clone();
        let matcher = narrow(circle(), move |payload: &u32| r.save(any()).apply(payload).map(Shape::Circle));

        assert!(matcher.apply(&Shape::Square(2)).is_failure());

        let m = matcher.apply(&Shape::Circle(2));
        assert_eq!(m.value(&radius).unwrap(), 2);

        let mut rewrites = MatchRewrites::new();
        rewrites.replace_value(&radius, 5);
        assert_eq!(m.rebuild(&rewrites).unwrap(), Shape::Circle(5));
    }

    #[test]
    fn is_variant_predicate() {
        let matcher = is_variant(circle());

        assert!(matcher.apply(&Shape::Circle(1)).is_success());
        assert!(matcher.apply(&Shape::Square(1)).is_failure());
        assert_eq!(matcher.rewrite(&Shape::Circle(1), |_, _| {}), Some(Shape::Circle(1)));
    }
}
