//! Captures: identity-keyed logic variables.
//!
//! A `Capture<T>` is a token that a match binds to a value of type `T`. The
//! capture itself holds no state; bindings live in [`Constraints`] and
//! overrides in [`MatchRewrites`]. Identity comes from a process-unique
//! [`CaptureId`], so two captures created with the same name never alias.
//! Cloning a capture clones the handle, not the identity.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Constraints, Match, MatchRewrites, Matcher, Value};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Source of default debug names (`capture1`, `capture2`, ...).
static DEFAULT_NAMES: NameSequence = NameSequence::new("capture");

struct NameSequence {
    prefix: &'static str,
    counter: AtomicU64,
}

impl NameSequence {
    const fn new(prefix: &'static str) -> Self {
        NameSequence { prefix, counter: AtomicU64::new(1) }
    }

    fn next(&self) -> String {
        format!("{}{}", self.prefix, self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identity of a [`Capture`], used as the key of binding and override tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaptureId(u64);

impl CaptureId {
    fn fresh() -> Self {
        CaptureId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Named logic variable that binds a value of type `T` during a match.
///
/// As a [`Matcher`], a capture matches any value and binds it. Use
/// [`Capture::save`] to bind the value matched by another matcher.
pub struct Capture<T> {
    id: CaptureId,
    name: Arc<str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Capture<T> {
    /// Create a capture with a generated debug name.
    pub fn new() -> Self {
        Self::named(DEFAULT_NAMES.next())
    }

    /// Create a capture with the given debug name.
    ///
    /// The name is only used in diagnostics.
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Capture { id: CaptureId::fresh(), name: name.into(), _marker: PhantomData }
    }

    pub fn id(&self) -> CaptureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Value> Capture<T> {
    /// Wrap `matcher` so that the value it matches is also bound to this capture.
    ///
    /// The binding is the original input, not the rebuilt value. On rebuild an
    /// override for this capture replaces the whole subtree; without one the
    /// subtree is rebuilt through `matcher`'s own match.
    pub fn save<M: Matcher<T>>(&self, matcher: M) -> Save<T, M> {
        Save { capture: self.clone(), matcher }
    }
}

impl<T> Default for Capture<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Capture<T> {
    fn clone(&self) -> Self {
        Capture { id: self.id, name: Arc::clone(&self.name), _marker: PhantomData }
    }
}

impl<T> PartialEq for Capture<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Capture<T> {}

impl<T> fmt::Debug for Capture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capture").field("id", &self.id).field("name", &self.name).finish()
    }
}

impl<T> fmt::Display for Capture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T: Value> Matcher<T> for Capture<T> {
    fn apply(&self, value: &T) -> Match<T> {
        let matched = value.clone();
        Match::from_capture(self, value.clone(), move |_: &MatchRewrites| matched.clone(), &Constraints::empty())
    }
}

/// Matcher returned by [`Capture::save`].
#[derive(Debug)]
pub struct Save<T, M> {
    capture: Capture<T>,
    matcher: M,
}

impl<T: Value, M: Matcher<T>> Matcher<T> for Save<T, M> {
    fn apply(&self, value: &T) -> Match<T> {
        self.matcher.apply(value).and_then(|inner| {
            let base = inner.constraints().clone();
            Match::from_capture(&self.capture, value.clone(), move |rewrites| inner.rebuild(rewrites), &base)
        })
    }
}
