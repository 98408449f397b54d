use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// SNMP protocol version used for a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SnmpVersion {
    #[serde(rename = "1")]
    V1,
    #[default]
    #[serde(rename = "2c")]
    V2c,
}

impl SnmpVersion {
    /// Value of the `-v` flag understood by net-snmp tools
    pub fn as_str(&self) -> &'static str {
        match self {
            SnmpVersion::V1 => "1",
            SnmpVersion::V2c => "2c",
        }
    }
}

// Accepts `1`, `"1"`, `v1`, `2c`, `v2c`: YAML reads a bare `1` as a number.
impl<'de> Deserialize<'de> for SnmpVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(1) => Ok(SnmpVersion::V1),
            Raw::Number(n) => Err(de::Error::custom(format!("unsupported SNMP version {}", n))),
            Raw::Text(s) => match s.to_ascii_lowercase().as_str() {
                "1" | "v1" => Ok(SnmpVersion::V1),
                "2c" | "v2c" => Ok(SnmpVersion::V2c),
                other => Err(de::Error::custom(format!("unsupported SNMP version {}", other))),
            },
        }
    }
}

/// Fully resolved device to poll. Defaults are already merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDescriptor {
    pub name: String,
    /// `host:port`
    pub address: String,
    /// Community string
    pub credential: String,
    pub version: SnmpVersion,
    /// OIDs in the order they are polled
    pub value_ids: Vec<String>,
    /// Wall-clock ceiling for the whole target
    pub budget: Duration,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Extra attempts allowed after a timed-out one
    pub retries: u32,
}

/// Why an attempt (or a whole value) failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// No answer within the per-attempt timeout; retry-eligible
    Timeout,
    /// Anything else: auth, protocol, missing object, spawn failure
    Other,
}

/// Result of polling one OID
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_secs"
    )]
    pub elapsed: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Executor calls spent on this OID
    pub attempts: u32,
}

impl ValueOutcome {
    pub fn succeeded(value: String, elapsed: Duration, attempts: u32) -> Self {
        Self {
            success: true,
            value: Some(value),
            elapsed: Some(elapsed),
            error_kind: None,
            error: None,
            attempts,
        }
    }

    pub fn failed(kind: FailureKind, error: String, attempts: u32) -> Self {
        Self {
            success: false,
            value: None,
            elapsed: None,
            error_kind: Some(kind),
            error: Some(error),
            attempts,
        }
    }

    /// Retries spent before the terminal attempt
    #[cfg(test)]
    pub fn retries(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }
}

/// Device-level roll-up of the value outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    Ok,
    Partial,
    Failed,
}

impl TargetStatus {
    /// Pure classification from success/failure counts.
    ///
    /// Zero successes is always `Failed`, including the case where nothing
    /// was attempted at all.
    pub fn from_counts(ok_count: usize, fail_count: usize) -> Self {
        match (ok_count, fail_count) {
            (0, _) => TargetStatus::Failed,
            (_, 0) => TargetStatus::Ok,
            _ => TargetStatus::Partial,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetStatus::Ok => "ok",
            TargetStatus::Partial => "partial",
            TargetStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated result of one poll cycle for one target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetReport {
    pub name: String,
    pub address: String,
    pub status: TargetStatus,
    pub fail_count: usize,
    #[serde(serialize_with = "serialize_secs")]
    pub runtime: Duration,
    /// Only OIDs that were started before the budget ran out
    pub outcomes: IndexMap<String, ValueOutcome>,
}

impl TargetReport {
    pub fn ok_count(&self) -> usize {
        self.outcomes.len() - self.fail_count
    }
}

fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

fn serialize_opt_secs<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match d {
        Some(d) => serialize_secs(d, s),
        None => s.serialize_none(),
    }
}
