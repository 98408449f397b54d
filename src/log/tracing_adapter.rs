use std::time::Duration;

use tracing::{info, warn};

use super::PollLog;
use crate::collector::TargetReport;

/// Forwards poll events to the `tracing` subscriber as structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPollLog;

impl PollLog for TracingPollLog {
    fn attempt_timed_out(&self, target: &str, value_id: &str, attempt: u32, max_attempts: u32) {
        warn!(
            target_name = %target,
            oid = %value_id,
            attempt,
            max_attempts,
            "SNMP request timed out"
        );
    }

    fn budget_exceeded(&self, target: &str, elapsed: Duration, budget: Duration, skipped: usize) {
        warn!(
            target_name = %target,
            elapsed_secs = elapsed.as_secs_f64(),
            budget_secs = budget.as_secs_f64(),
            skipped,
            "Poll budget exceeded, skipping remaining OIDs"
        );
    }

    fn target_completed(&self, report: &TargetReport) {
        info!(
            target_name = %report.name,
            status = %report.status,
            ok_count = report.ok_count(),
            fail_count = report.fail_count,
            runtime_secs = report.runtime.as_secs_f64(),
            "Target polled"
        );
    }
}
