use regex::Regex;

use crate::{Match, Matcher, Value, from_fn};

/// Match values for which `test` returns true. Rebuilds to the input.
pub fn predicate<T: Value>(test: impl Fn(&T) -> bool + Send + Sync) -> impl Matcher<T> {
    from_fn(move |value: &T| if test(value) { Match::from_value(value.clone()) } else { Match::Failure })
}

/// Match any value.
pub fn any<T: Value>() -> impl Matcher<T> {
    predicate(|_: &T| true)
}

/// Match values equal to `expected`.
pub fn is_equal<T: Value>(expected: T) -> impl Matcher<T> {
    predicate(move |value: &T| *value == expected)
}

/// Match string-like values that `re` matches somewhere.
///
/// Pair with [`regex!`](crate::regex) to keep the compiled pattern static:
/// `matches_regex(regex!(r"^[a-z_]\w*$"))`.
pub fn matches_regex<T: Value + AsRef<str>>(re: &'static Regex) -> impl Matcher<T> {
    predicate(move |value: &T| re.is_match(value.as_ref()))
}

/// Adapt a matcher for `T` to `Option<T>`: `None` fails, `Some` delegates.
pub fn required<T: Value, M: Matcher<T>>(matcher: M) -> Required<M> {
    Required { matcher }
}

/// Matcher returned by [`required`].
#[derive(Debug)]
pub struct Required<M> {
    matcher: M,
}

impl<T: Value, M: Matcher<T>> Matcher<Option<T>> for Required<M> {
    fn apply(&self, value: &Option<T>) -> Match<Option<T>> {
        match value {
            Some(inner) => self.matcher.apply(inner).map(Some),
            None => Match::Failure,
        }
    }
}
