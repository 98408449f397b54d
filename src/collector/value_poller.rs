use std::time::Duration;

use crate::collector::{FailureKind, TargetDescriptor, ValueOutcome};
use crate::log::PollLog;
use crate::snmp::{QueryBuilder, QueryExecutor};

/// Drives the per-OID retry state machine.
///
/// Only attempts the executor classifies as [`FailureKind::Timeout`] are
/// retried; any other failure ends the OID on the spot.
pub struct ValuePoller<'a> {
    pub builder: &'a dyn QueryBuilder,
    pub executor: &'a dyn QueryExecutor,
    pub log: &'a dyn PollLog,
}

impl ValuePoller<'_> {
    /// Polls one OID, making at most `max_retries + 1` executor calls.
    pub async fn poll(
        &self,
        target: &TargetDescriptor,
        value_id: &str,
        timeout: Duration,
        max_retries: u32,
    ) -> ValueOutcome {
        let mut attempt: u32 = 0;
        let mut last_error = String::new();

        while attempt <= max_retries {
            let query = self.builder.build(target, value_id);
            let result = self.executor.execute(&query, timeout).await;

            if result.succeeded {
                return ValueOutcome::succeeded(result.output, result.elapsed, attempt + 1);
            }

            match result.error_kind {
                Some(FailureKind::Timeout) => {
                    attempt += 1;
                    self.log.attempt_timed_out(
                        &target.name,
                        value_id,
                        attempt,
                        max_retries.saturating_add(1),
                    );
                    last_error = result.output;
                }
                // A failed call without a kind is treated as permanent
                Some(FailureKind::Other) | None => {
                    return ValueOutcome::failed(FailureKind::Other, result.output, attempt + 1);
                }
            }
        }

        ValueOutcome::failed(FailureKind::Timeout, last_error, attempt)
    }
}
