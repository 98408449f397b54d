//! Fakes shared by the poller tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::collector::{FailureKind, SnmpVersion, TargetDescriptor, TargetReport};
use crate::log::PollLog;
use crate::snmp::{ExecOutcome, QueryExecutor, SnmpQuery};

pub fn target(oids: &[&str]) -> TargetDescriptor {
    TargetDescriptor {
        name: "test-target".to_string(),
        address: "192.0.2.1:161".to_string(),
        credential: "public".to_string(),
        version: SnmpVersion::V2c,
        value_ids: oids.iter().map(|o| o.to_string()).collect(),
        budget: Duration::from_secs(10),
        timeout: Duration::from_secs(1),
        retries: 1,
    }
}

/// One scripted executor reply, taking `delay` of (virtual) time.
#[derive(Debug, Clone)]
pub struct Step {
    succeeded: bool,
    kind: Option<FailureKind>,
    output: String,
    delay: Duration,
}

impl Step {
    pub fn ok(value: &str, millis: u64) -> Self {
        Self {
            succeeded: true,
            kind: None,
            output: value.to_string(),
            delay: Duration::from_millis(millis),
        }
    }

    pub fn timeout(millis: u64) -> Self {
        Self {
            succeeded: false,
            kind: Some(FailureKind::Timeout),
            output: "Timeout: No Response".to_string(),
            delay: Duration::from_millis(millis),
        }
    }

    pub fn other(message: &str, millis: u64) -> Self {
        Self {
            succeeded: false,
            kind: Some(FailureKind::Other),
            output: message.to_string(),
            delay: Duration::from_millis(millis),
        }
    }

    pub fn unclassified(message: &str) -> Self {
        Self {
            succeeded: false,
            kind: None,
            output: message.to_string(),
            delay: Duration::ZERO,
        }
    }
}

/// Replays a per-OID script. The last step repeats once the script runs
/// out; OIDs without a script answer `"value"` after 100ms.
#[derive(Default)]
pub struct ScriptedExecutor {
    scripts: HashMap<String, Vec<Step>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, oid: &str, steps: impl IntoIterator<Item = Step>) -> Self {
        self.scripts.insert(oid.to_string(), steps.into_iter().collect());
        self
    }

    pub fn calls(&self, oid: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == oid).count()
    }

    pub fn call_order(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn execute(&self, query: &SnmpQuery, _timeout: Duration) -> ExecOutcome {
        let step = {
            let mut calls = self.calls.lock().unwrap();
            let n = calls.iter().filter(|c| **c == query.oid).count();
            calls.push(query.oid.clone());
            match self.scripts.get(&query.oid) {
                Some(steps) => steps
                    .get(n)
                    .or_else(|| steps.last())
                    .cloned()
                    .unwrap_or_else(|| Step::ok("value", 100)),
                None => Step::ok("value", 100),
            }
        };

        tokio::time::sleep(step.delay).await;

        ExecOutcome {
            succeeded: step.succeeded,
            output: step.output,
            error_kind: step.kind,
            elapsed: step.delay,
        }
    }
}

/// Keeps poll events as short strings.
#[derive(Default)]
pub struct RecordingLog {
    events: Mutex<Vec<String>>,
}

impl RecordingLog {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl PollLog for RecordingLog {
    fn attempt_timed_out(&self, target: &str, value_id: &str, attempt: u32, max_attempts: u32) {
        self.events
            .lock()
            .unwrap()
            .push(format!("timeout {} {} {}/{}", target, value_id, attempt, max_attempts));
    }

    fn budget_exceeded(&self, target: &str, _elapsed: Duration, _budget: Duration, skipped: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("budget {} skipped={}", target, skipped));
    }

    fn target_completed(&self, report: &TargetReport) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done {} {}", report.name, report.status));
    }
}
