use std::time::Duration;

use async_trait::async_trait;

use super::SnmpQuery;
use crate::collector::FailureKind;

/// What a single executor call produced
#[derive(Debug, Clone, PartialEq)]
pub struct ExecOutcome {
    pub succeeded: bool,
    /// Returned value on success, error text on failure
    pub output: String,
    /// `None` on success
    pub error_kind: Option<FailureKind>,
    pub elapsed: Duration,
}

impl ExecOutcome {
    pub fn success(output: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            succeeded: true,
            output: output.into(),
            error_kind: None,
            elapsed,
        }
    }

    pub fn timeout(output: impl Into<String>, elapsed: Duration) -> Self {
        Self::failure(FailureKind::Timeout, output, elapsed)
    }

    pub fn other(output: impl Into<String>, elapsed: Duration) -> Self {
        Self::failure(FailureKind::Other, output, elapsed)
    }

    pub fn failure(kind: FailureKind, output: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            succeeded: false,
            output: output.into(),
            error_kind: Some(kind),
            elapsed,
        }
    }
}

/// Performs one SNMP query.
///
/// Implementations must return no later than `timeout` plus a small
/// overhead and must classify failures themselves: the pollers only look
/// at [`ExecOutcome::error_kind`], never at the text.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &SnmpQuery, timeout: Duration) -> ExecOutcome;
}
