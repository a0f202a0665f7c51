//! List combinators.
//!
//! Rebuilds are copy-on-write: `contains` and `list_with_consecutive` keep the
//! original list and overwrite only the positions they matched.
//!
//! ```text
//! list_with_consecutive([m0, m1]) on [a, b, c, d]
//!
//! start 0: m0(a) ok, m1(b) fails          -> next start
//! start 1: m0(b) ok, m1(c) ok, merge bad  -> next start
//! start 2: m0(c) ok, m1(d) ok, merge ok   -> rebuild = [a, b, m0', m1']
//! ```

use smallvec::SmallVec;
use tracing::trace;

use crate::matching::rebuild_all;
use crate::{Constraints, Match, Matcher, Success, Value};

/// Match a list of exactly `matchers.len()` elements, element-wise.
pub fn list<T: Value, M: Matcher<T>>(matchers: Vec<M>) -> List<M> {
    List { matchers }
}

/// Match the first `prefix.len()` elements positionally and the rest of the
/// list, as a whole, with `suffix`.
pub fn list_with_prefix<T: Value, M: Matcher<T>, S: Matcher<Vec<T>>>(prefix: Vec<M>, suffix: S) -> ListWithPrefix<M, S> {
    ListWithPrefix { prefix, suffix }
}

/// Match the first element that `matcher` accepts.
pub fn contains<T: Value, M: Matcher<T>>(matcher: M) -> Contains<M> {
    Contains { matcher }
}

/// Match the leftmost run of consecutive elements accepted by `matchers`.
pub fn list_with_consecutive<T: Value, M: Matcher<T>>(matchers: Vec<M>) -> ListWithConsecutive<M> {
    ListWithConsecutive { matchers }
}

/// Matcher returned by [`list`].
#[derive(Debug)]
pub struct List<M> {
    matchers: Vec<M>,
}

impl<T: Value, M: Matcher<T>> Matcher<Vec<T>> for List<M> {
    fn apply(&self, value: &Vec<T>) -> Match<Vec<T>> {
        if value.len() != self.matchers.len() {
            return Match::Failure;
        }

        let mut matches = Vec::with_capacity(self.matchers.len());
        for (matcher, element) in self.matchers.iter().zip(value) {
            match matcher.apply(element) {
                Match::Success(m) => matches.push(Match::Success(m)),
                Match::Failure => return Match::Failure,
            }
        }

        Match::from_list(matches)
    }
}

/// Matcher returned by [`list_with_prefix`].
#[derive(Debug)]
pub struct ListWithPrefix<M, S> {
    prefix: Vec<M>,
    suffix: S,
}

impl<M, S> ListWithPrefix<M, S> {
    fn prefix_matches<T: Value>(&self, values: &[T]) -> Option<Vec<Match<T>>>
    where
        M: Matcher<T>,
    {
        if self.prefix.len() > values.len() {
            return None;
        }

        let mut matches = Vec::with_capacity(self.prefix.len());
        for (matcher, element) in self.prefix.iter().zip(values) {
            match matcher.apply(element) {
                Match::Success(m) => matches.push(Match::Success(m)),
                Match::Failure => return None,
            }
        }
        Some(matches)
    }
}

impl<T: Value, M: Matcher<T>, S: Matcher<Vec<T>>> Matcher<Vec<T>> for ListWithPrefix<M, S> {
    fn apply(&self, value: &Vec<T>) -> Match<Vec<T>> {
        let Some(prefix) = self.prefix_matches(value) else {
            return Match::Failure;
        };

        let suffix = value[prefix.len()..].to_vec();
        let suffix_match = self.suffix.apply(&suffix);

        Match::from_list_and(
            |mut head: Vec<T>, tail: Vec<T>| {
                head.extend(tail);
                head
            },
            prefix,
            suffix_match,
        )
    }
}

/// Matcher returned by [`contains`].
#[derive(Debug)]
pub struct Contains<M> {
    matcher: M,
}

impl<T: Value, M: Matcher<T>> Matcher<Vec<T>> for Contains<M> {
    fn apply(&self, value: &Vec<T>) -> Match<Vec<T>> {
        for (index, element) in value.iter().enumerate() {
            if let Match::Success(m) = self.matcher.apply(element) {
                trace!(index, len = value.len(), "contains: element matched");
                let original = value.clone();
                return Match::Success(m).map(move |rebuilt| {
                    let mut list = original.clone();
                    list[index] = rebuilt;
                    list
                });
            }
        }
        Match::Failure
    }
}

/// Matcher returned by [`list_with_consecutive`].
#[derive(Debug)]
pub struct ListWithConsecutive<M> {
    matchers: Vec<M>,
}

/// Scratch buffer for the element matches of one candidate window.
type Window<T> = SmallVec<[Success<T>; 4]>;

impl<M> ListWithConsecutive<M> {
    /// Try the window starting at `start`, leaving its matches in `window`.
    ///
    /// Stops at the first element that fails. A window whose element matches
    /// all succeed can still be rejected if their constraints conflict.
    fn matches_at<T: Value>(&self, values: &[T], start: usize, window: &mut Window<T>) -> Option<Constraints>
    where
        M: Matcher<T>,
    {
        window.clear();

        for (matcher, element) in self.matchers.iter().zip(&values[start..]) {
            match matcher.apply(element) {
                Match::Success(m) => window.push(m),
                Match::Failure => return None,
            }
        }

        let constraints = Constraints::merge_all(window.iter().map(Success::constraints));
        if constraints.is_invalid() {
            trace!(start, width = self.matchers.len(), "consecutive: window rejected by conflicting captures");
            return None;
        }
        Some(constraints)
    }
}

impl<T: Value, M: Matcher<T>> Matcher<Vec<T>> for ListWithConsecutive<M> {
    fn apply(&self, value: &Vec<T>) -> Match<Vec<T>> {
        let width = self.matchers.len();
        if width > value.len() {
            return Match::Failure;
        }

        let mut window = Window::with_capacity(width);
        for start in 0..=value.len() - width {
            let Some(constraints) = self.matches_at(value, start, &mut window) else {
                continue;
            };

            trace!(start, width, "consecutive: window matched");
            let original = value.clone();
            let window: Vec<Success<T>> = window.into_vec();
            return Match::from_rebuilder(
                move |rewrites| {
                    let mut list = original.clone();
                    for (slot, rebuilt) in list[start..start + width].iter_mut().zip(rebuild_all(&window, rewrites)) {
                        *slot = rebuilt;
                    }
                    list
                },
                constraints,
            );
        }
        Match::Failure
    }
}
