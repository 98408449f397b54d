use std::time::Duration;

use super::PollLog;
use crate::collector::TargetReport;

/// Discards all poll events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPollLog;

impl PollLog for NoOpPollLog {
    #[inline]
    fn attempt_timed_out(&self, _target: &str, _value_id: &str, _attempt: u32, _max_attempts: u32) {}

    #[inline]
    fn budget_exceeded(&self, _target: &str, _elapsed: Duration, _budget: Duration, _skipped: usize) {}

    #[inline]
    fn target_completed(&self, _report: &TargetReport) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_log_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoOpPollLog>();
    }
}
