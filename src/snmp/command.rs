use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::{Instant, timeout};

use super::{ExecOutcome, QueryExecutor, SnmpQuery};

/// Slack on top of the per-attempt timeout before the child is killed.
const KILL_GRACE: Duration = Duration::from_millis(250);

/// Executes queries by running net-snmp `snmpget`.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    program: PathBuf,
}

impl CommandExecutor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new("snmpget")
    }
}

#[async_trait]
impl QueryExecutor for CommandExecutor {
    async fn execute(&self, query: &SnmpQuery, limit: Duration) -> ExecOutcome {
        let start = Instant::now();

        let child = Command::new(&self.program)
            .args(query.snmpget_args(limit))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match timeout(limit + KILL_GRACE, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return ExecOutcome::other(
                    format!("Cannot run {}: {}", self.program.display(), e),
                    start.elapsed(),
                );
            }
            Err(_) => {
                return ExecOutcome::timeout(
                    format!("Timeout: No Response from {}", query.address),
                    start.elapsed(),
                );
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if output.status.success() {
            // snmpget exits 0 even when the agent has no such object
            if stdout.starts_with("No Such Object") || stdout.starts_with("No Such Instance") {
                return ExecOutcome::other(stdout, start.elapsed());
            }
            return ExecOutcome::success(stdout, start.elapsed());
        }

        let message = if stderr.is_empty() {
            format!("snmpget exited with {}", output.status)
        } else {
            stderr
        };

        if message.starts_with("Timeout") {
            ExecOutcome::timeout(message, start.elapsed())
        } else {
            ExecOutcome::other(message, start.elapsed())
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use super::*;
    use crate::collector::{FailureKind, SnmpVersion};

    fn query() -> SnmpQuery {
        SnmpQuery {
            address: "192.0.2.1:161".to_string(),
            community: "public".to_string(),
            version: SnmpVersion::V2c,
            oid: "1.3.6.1.2.1.1.3.0".to_string(),
        }
    }

    /// Writes an executable shell script standing in for `snmpget`.
    fn fake_snmpget(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("snmpget");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn success_returns_trimmed_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_snmpget(&dir, "echo '  123456  '");

        let outcome = CommandExecutor::new(program)
            .execute(&query(), Duration::from_secs(2))
            .await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.output, "123456");
        assert_eq!(outcome.error_kind, None);
    }

    #[tokio::test]
    async fn passes_query_as_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_snmpget(&dir, "echo \"args: $*\"");

        let outcome = CommandExecutor::new(program)
            .execute(&query(), Duration::from_secs(2))
            .await;

        assert_eq!(
            outcome.output,
            "args: -v 2c -c public -t 2 -r 0 -Oqv 192.0.2.1:161 1.3.6.1.2.1.1.3.0"
        );
    }

    #[tokio::test]
    async fn timeout_on_stderr_is_transient() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_snmpget(&dir, "echo 'Timeout: No Response from 192.0.2.1' >&2; exit 1");

        let outcome = CommandExecutor::new(program)
            .execute(&query(), Duration::from_secs(2))
            .await;

        assert!(!outcome.succeeded);
        assert_eq!(outcome.error_kind, Some(FailureKind::Timeout));
    }

    #[tokio::test]
    async fn auth_error_is_permanent() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_snmpget(&dir, "echo 'snmpget: Authentication failure' >&2; exit 1");

        let outcome = CommandExecutor::new(program)
            .execute(&query(), Duration::from_secs(2))
            .await;

        assert_eq!(outcome.error_kind, Some(FailureKind::Other));
        assert_eq!(outcome.output, "snmpget: Authentication failure");
    }

    #[tokio::test]
    async fn missing_object_is_permanent() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_snmpget(
            &dir,
            "echo 'No Such Object available on this agent at this OID'",
        );

        let outcome = CommandExecutor::new(program)
            .execute(&query(), Duration::from_secs(2))
            .await;

        assert!(!outcome.succeeded);
        assert_eq!(outcome.error_kind, Some(FailureKind::Other));
    }

    #[tokio::test]
    async fn missing_program_is_permanent() {
        let outcome = CommandExecutor::new("/nonexistent/snmpget")
            .execute(&query(), Duration::from_secs(1))
            .await;

        assert_eq!(outcome.error_kind, Some(FailureKind::Other));
        assert!(outcome.output.contains("Cannot run"));
    }

    #[tokio::test]
    async fn hung_child_is_killed_at_deadline() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_snmpget(&dir, "exec sleep 30");

        let outcome = CommandExecutor::new(program)
            .execute(&query(), Duration::from_millis(200))
            .await;

        assert_eq!(outcome.error_kind, Some(FailureKind::Timeout));
        assert!(outcome.elapsed < Duration::from_secs(5));
    }
}
