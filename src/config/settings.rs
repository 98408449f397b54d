use serde::{Deserialize, Serialize};

use crate::collector::SnmpVersion;

pub const DEFAULT_BUDGET_SECS: f64 = 10.0;
pub const DEFAULT_TIMEOUT_SECS: f64 = 2.5;
pub const DEFAULT_RETRIES: u32 = 1;
pub const MAX_RETRIES: u32 = 10;
pub const DEFAULT_PORT: u16 = 161;
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8161";

/// Values applied to every target that does not set its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    /// Per-target wall-clock budget (seconds)
    pub budget: f64,
    /// Per-attempt timeout (seconds)
    pub timeout: f64,
    /// Retries after a timed-out attempt
    pub retries: u32,
    pub port: u16,
    pub version: SnmpVersion,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET_SECS,
            timeout: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            port: DEFAULT_PORT,
            version: SnmpVersion::default(),
        }
    }
}

/// How SNMP queries are carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorKind {
    /// In-process UDP session
    #[default]
    Session,
    /// External net-snmp `snmpget`
    Command,
}
