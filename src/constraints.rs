//! Capture bindings accumulated during a match.
//!
//! Constraints are immutable. A new set only arises from [`Constraints::merge`],
//! which succeeds when both sides agree on every capture they share.
//!
//! ```text
//! merge(Invalid, _)        = Invalid
//! merge(_, Invalid)        = Invalid
//! merge(Empty, c)          = c
//! merge(c, Empty)          = c
//! merge(Valid a, Valid b)  = Valid(a ∪ b)   if a[k] == b[k] for all shared k
//!                          = Invalid        otherwise
//! ```
//!
//! `None` bound to a `Capture<Option<_>>` is a binding like any other: it
//! agrees with `None` and conflicts with `Some(_)`.

use std::any::{Any, type_name};
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{Capture, CaptureId, Error, Match, Result, Value};

/// Type-erased bound value that can still be compared for equality.
pub(crate) trait Bound: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq_bound(&self, other: &dyn Bound) -> bool;
}

impl<T: Value> Bound for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_bound(&self, other: &dyn Bound) -> bool {
        other.as_any().downcast_ref::<T>().is_some_and(|other| other == self)
    }
}

pub(crate) type BindingMap = FxHashMap<CaptureId, Arc<dyn Bound>>;

/// Look up `capture` in `map` and clone the value out as a `T`.
pub(crate) fn lookup<T: Value>(map: &BindingMap, capture: &Capture<T>) -> Option<Result<T>> {
    let bound = map.get(&capture.id())?;
    Some(
        (**bound)
            .as_any()
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| Error::BindingType { capture: capture.to_string(), expected: type_name::<T>() }),
    )
}

/// Consistency-checked set of capture bindings.
///
/// Opaque so that a valid set always holds at least one binding and every
/// instance comes out of the constructors or [`Constraints::merge`].
#[derive(Clone, Default)]
pub struct Constraints(Inner);

#[derive(Clone, Default)]
enum Inner {
    /// No bindings. Always valid.
    #[default]
    Empty,
    /// At least one binding, all mutually consistent.
    Valid(Arc<BindingMap>),
    /// Absorbing failure state.
    Invalid,
}

impl Constraints {
    pub fn empty() -> Self {
        Constraints(Inner::Empty)
    }

    pub fn invalid() -> Self {
        Constraints(Inner::Invalid)
    }

    /// Constraints binding `capture` to `value`. Always valid.
    pub fn for_capture<T: Value>(capture: &Capture<T>, value: T) -> Self {
        let mut map = BindingMap::default();
        map.insert(capture.id(), Arc::new(value) as Arc<dyn Bound>);
        Constraints(Inner::Valid(Arc::new(map)))
    }

    /// Merged constraints of all `matches`. Any failure makes the result invalid.
    pub fn of_matches<'a, V: 'a>(matches: impl IntoIterator<Item = &'a Match<V>>) -> Constraints {
        let mut merged = Constraints::empty();
        for m in matches {
            match m {
                Match::Success(success) => merged = merged.merge(success.constraints()),
                Match::Failure => return Constraints::invalid(),
            }
            if merged.is_invalid() {
                break;
            }
        }
        merged
    }

    pub fn is_valid(&self) -> bool {
        !self.is_invalid()
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.0, Inner::Invalid)
    }

    /// True for valid constraints without bindings.
    pub fn is_empty(&self) -> bool {
        matches!(self.0, Inner::Empty)
    }

    /// Number of bound captures (zero for invalid constraints).
    pub fn len(&self) -> usize {
        match &self.0 {
            Inner::Valid(map) => map.len(),
            Inner::Empty | Inner::Invalid => 0,
        }
    }

    /// Merge with `other`, producing invalid constraints on any disagreement.
    pub fn merge(&self, other: &Constraints) -> Constraints {
        match (&self.0, &other.0) {
            (Inner::Invalid, _) | (_, Inner::Invalid) => Constraints::invalid(),
            (Inner::Empty, _) => other.clone(),
            (_, Inner::Empty) => self.clone(),
            (Inner::Valid(lhs), Inner::Valid(rhs)) => {
                // Copy the larger side and fold the smaller one into it.
                let (base, extra) = if lhs.len() >= rhs.len() { (lhs, rhs) } else { (rhs, lhs) };
                let mut merged = BindingMap::clone(base);
                for (id, value) in extra.iter() {
                    match merged.entry(*id) {
                        Entry::Occupied(existing) => {
                            if !existing.get().eq_bound(&**value) {
                                return Constraints::invalid();
                            }
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(Arc::clone(value));
                        }
                    }
                }
                Constraints(Inner::Valid(Arc::new(merged)))
            }
        }
    }

    /// Merge every set left to right, starting from empty constraints.
    pub fn merge_all<'a>(constraints: impl IntoIterator<Item = &'a Constraints>) -> Constraints {
        let mut merged = Constraints::empty();
        for c in constraints {
            merged = merged.merge(c);
            if merged.is_invalid() {
                break;
            }
        }
        merged
    }

    /// Value bound to `capture`.
    pub fn value<T: Value>(&self, capture: &Capture<T>) -> Result<T> {
        match &self.0 {
            Inner::Invalid => Err(Error::InvalidConstraints { capture: capture.to_string() }),
            Inner::Empty => Err(Error::MissingBinding { capture: capture.to_string() }),
            Inner::Valid(map) => {
                lookup(map, capture).unwrap_or_else(|| Err(Error::MissingBinding { capture: capture.to_string() }))
            }
        }
    }

    pub fn contains<T>(&self, capture: &Capture<T>) -> bool {
        match &self.0 {
            Inner::Valid(map) => map.contains_key(&capture.id()),
            Inner::Empty | Inner::Invalid => false,
        }
    }
}

impl PartialEq for Constraints {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Inner::Invalid, Inner::Invalid) | (Inner::Empty, Inner::Empty) => true,
            (Inner::Valid(lhs), Inner::Valid(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().all(|(id, value)| rhs.get(id).is_some_and(|other| value.eq_bound(&**other)))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Inner::Empty => f.write_str("Constraints[]"),
            Inner::Invalid => f.write_str("InvalidConstraints"),
            Inner::Valid(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by_key(|(id, _)| **id);
                f.write_str("Constraints")?;
                f.debug_map().entries(entries).finish()
            }
        }
    }
}

#[cfg(test)]
#[path = "constraints/tests.rs"]
mod tests;
