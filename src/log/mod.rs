//! Poll event logging.
//!
//! The pollers never call the global `tracing` macros directly. They report
//! through a [`PollLog`] handed to them, so tests can observe retries and
//! budget cut-offs without capturing process output.
//!
//! - [`TracingPollLog`]: forwards events to `tracing`
//! - `NoOpPollLog` (tests only): discards everything

#[cfg(test)]
mod noop;
mod tracing_adapter;

use std::time::Duration;

use crate::collector::TargetReport;

#[cfg(test)]
pub use noop::NoOpPollLog;
pub use tracing_adapter::TracingPollLog;

/// Events emitted while polling a target.
pub trait PollLog: Send + Sync {
    /// An attempt timed out. `attempt` is 1-based; the OID is retried while
    /// `attempt < max_attempts`.
    fn attempt_timed_out(&self, target: &str, value_id: &str, attempt: u32, max_attempts: u32);

    /// The budget ran out before `skipped` OIDs could be started.
    fn budget_exceeded(&self, target: &str, elapsed: Duration, budget: Duration, skipped: usize);

    /// The target finished polling.
    fn target_completed(&self, report: &TargetReport);
}
