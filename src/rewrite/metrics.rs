//! Rewrite run metrics.
//!
//! Collected only when [`RewriteOptions::collect_metrics`](crate::RewriteOptions)
//! is set; [`rewrite_to_fixpoint`](crate::rewrite_to_fixpoint) never pays for
//! them.

use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RewriteMetrics {
    /// Total elapsed time for the run, including the final failed match.
    pub total: Duration,
    /// One entry per successful rewrite, in order.
    pub steps: Vec<StepMetrics>,
}

/// Timing for a single match + rebuild.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StepMetrics {
    pub duration: Duration,
    /// Number of capture overrides the builder registered.
    pub overrides: usize,
}

/// Result of [`rewrite_to_fixpoint_with`](crate::rewrite_to_fixpoint_with).
#[derive(Debug, Clone)]
pub struct RewriteRun<T> {
    /// Last rebuilt value, or the input if nothing matched.
    pub value: T,
    /// Number of successful rewrites.
    pub steps: usize,
    /// True if the loop stopped at `max_iterations` while the matcher still matched.
    pub limit_reached: bool,
    /// Timing measurements, empty unless requested.
    pub metrics: RewriteMetrics,
}
