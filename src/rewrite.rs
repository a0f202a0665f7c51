//! Rewrite driver.
//!
//! ```text
//! value ── matcher.apply ──> Failure ──────────────────────────> done
//!   ^                   └──> Success ── builder(&success, &mut rewrites)
//!   │                                          │
//!   └──────────── success.rebuild(&rewrites) <─┘
//! ```
//!
//! Each step gets a fresh [`MatchRewrites`] that is dropped right after the
//! rebuild. The loop has no cycle detection: it stops when the matcher fails,
//! or at [`RewriteOptions::max_iterations`] when one is set.

use std::time::Instant;

use tracing::debug;

use crate::{Match, MatchRewrites, Matcher, Success, Value};

#[path = "rewrite/metrics.rs"]
mod metrics;

pub use metrics::{RewriteMetrics, RewriteRun, StepMetrics};

/// Options for [`rewrite_to_fixpoint_with`].
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    /// Stop after this many rewrites. `None` runs until the matcher fails.
    pub max_iterations: Option<usize>,
    /// Record per-step timings in [`RewriteRun::metrics`].
    pub collect_metrics: bool,
}

impl RewriteOptions {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_metrics(mut self) -> Self {
        self.collect_metrics = true;
        self
    }
}

/// Match `value` once and rebuild it with the overrides chosen by
/// `rewrite_builder`. `None` means the matcher did not match.
pub fn rewrite_once<T, M>(
    value: &T,
    matcher: &M,
    rewrite_builder: impl FnOnce(&Success<T>, &mut MatchRewrites),
) -> Option<T>
where
    T: Value,
    M: Matcher<T> + ?Sized,
{
    matcher.apply(value).rewrite(rewrite_builder)
}

/// Rewrite `value` until `matcher` no longer matches and return the result.
///
/// Returns `value` unchanged if the first attempt fails. Never terminates if
/// every rebuilt value matches again; use [`rewrite_to_fixpoint_with`] with a
/// limit when the rules are not known to converge.
pub fn rewrite_to_fixpoint<T, M>(
    value: T,
    matcher: &M,
    rewrite_builder: impl FnMut(&Success<T>, &mut MatchRewrites),
) -> T
where
    T: Value,
    M: Matcher<T> + ?Sized,
{
    rewrite_to_fixpoint_with(value, matcher, rewrite_builder, &RewriteOptions::default()).value
}

/// [`rewrite_to_fixpoint`] with an optional iteration limit and metrics.
pub fn rewrite_to_fixpoint_with<T, M>(
    value: T,
    matcher: &M,
    mut rewrite_builder: impl FnMut(&Success<T>, &mut MatchRewrites),
    options: &RewriteOptions,
) -> RewriteRun<T>
where
    T: Value,
    M: Matcher<T> + ?Sized,
{
    let run_start = Instant::now();
    let mut metrics = RewriteMetrics::default();
    let mut current = value;
    let mut steps = 0;
    let mut limit_reached = false;

    loop {
        let step_start = Instant::now();
        let Match::Success(success) = matcher.apply(&current) else {
            break;
        };
        if options.max_iterations.is_some_and(|max| steps >= max) {
            limit_reached = true;
            break;
        }

        let mut rewrites = MatchRewrites::new();
        rewrite_builder(&success, &mut rewrites);
        current = success.rebuild(&rewrites);
        steps += 1;

        debug!(step = steps, overrides = rewrites.len(), "rewrite: rebuilt matched value");
        if options.collect_metrics {
            metrics.steps.push(StepMetrics { duration: step_start.elapsed(), overrides: rewrites.len() });
        }
    }

    if options.collect_metrics {
        metrics.total = run_start.elapsed();
    }
    debug!(steps, limit_reached, "rewrite: fixpoint loop finished");

    RewriteRun { value: current, steps, limit_reached, metrics }
}
