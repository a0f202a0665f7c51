//! Per-rebuild override table.

use std::sync::Arc;

use crate::constraints::{BindingMap, Bound, lookup};
use crate::{Capture, Value};

/// Replacement values for captures, consulted by one rebuild.
///
/// A rewrite callback fills the table, the rebuild reads it, and it is dropped
/// afterwards. Captures without an entry rebuild to their matched value.
#[derive(Debug, Default)]
pub struct MatchRewrites {
    replaced: BindingMap,
}

impl MatchRewrites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever `capture` matched with `value` on rebuild.
    ///
    /// Setting the same capture twice keeps the last value.
    pub fn replace_value<T: Value>(&mut self, capture: &Capture<T>, value: T) {
        self.replaced.insert(capture.id(), Arc::new(value) as Arc<dyn Bound>);
    }

    /// Override registered for `capture`, if any.
    pub fn replaced_value<T: Value>(&self, capture: &Capture<T>) -> Option<T> {
        lookup(&self.replaced, capture).and_then(|value| value.ok())
    }

    pub fn is_empty(&self) -> bool {
        self.replaced.is_empty()
    }

    pub fn len(&self) -> usize {
        self.replaced.len()
    }
}
