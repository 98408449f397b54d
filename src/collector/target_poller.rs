use std::sync::Arc;

use indexmap::IndexMap;
use tokio::time::Instant;

use super::{TargetDescriptor, TargetReport, TargetStatus, ValuePoller};
use crate::log::PollLog;
use crate::snmp::{QueryBuilder, QueryExecutor, SnmpGetBuilder};

/// Polls every OID of a target, one after another, within its budget
pub struct TargetPoller {
    builder: Arc<dyn QueryBuilder>,
    executor: Arc<dyn QueryExecutor>,
    log: Arc<dyn PollLog>,
}

impl TargetPoller {
    pub fn new(executor: Arc<dyn QueryExecutor>, log: Arc<dyn PollLog>) -> Self {
        Self::with_builder(Arc::new(SnmpGetBuilder), executor, log)
    }

    pub fn with_builder(
        builder: Arc<dyn QueryBuilder>,
        executor: Arc<dyn QueryExecutor>,
        log: Arc<dyn PollLog>,
    ) -> Self {
        Self {
            builder,
            executor,
            log,
        }
    }

    /// Runs one poll cycle for `target`.
    ///
    /// The budget is only checked before starting an OID: an attempt in
    /// flight is never cut short, and OIDs not started when the budget
    /// runs out are left out of the report entirely.
    pub async fn poll(&self, target: &TargetDescriptor) -> TargetReport {
        let start = Instant::now();
        let mut outcomes = IndexMap::with_capacity(target.value_ids.len());
        let mut ok_count = 0;
        let mut fail_count = 0;

        let values = ValuePoller {
            builder: self.builder.as_ref(),
            executor: self.executor.as_ref(),
            log: self.log.as_ref(),
        };

        for (index, value_id) in target.value_ids.iter().enumerate() {
            let elapsed = start.elapsed();
            if elapsed > target.budget {
                self.log.budget_exceeded(
                    &target.name,
                    elapsed,
                    target.budget,
                    target.value_ids.len() - index,
                );
                break;
            }

            let outcome = values
                .poll(target, value_id, target.timeout, target.retries)
                .await;

            if outcome.success {
                ok_count += 1;
            } else {
                fail_count += 1;
            }
            outcomes.insert(value_id.clone(), outcome);
        }

        let report = TargetReport {
            name: target.name.clone(),
            address: target.address.clone(),
            status: TargetStatus::from_counts(ok_count, fail_count),
            fail_count,
            runtime: start.elapsed(),
            outcomes,
        };

        self.log.target_completed(&report);
        report
    }

    /// Polls targets sequentially, each against its own budget clock
    pub async fn poll_all(&self, targets: &[TargetDescriptor]) -> Vec<TargetReport> {
        let mut reports = Vec::with_capacity(targets.len());
        for target in targets {
            reports.push(self.poll(target).await);
        }
        reports
    }
}
