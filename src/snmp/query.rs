use std::time::Duration;

use crate::collector::{SnmpVersion, TargetDescriptor};

/// A single SNMP GET, ready to hand to an executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnmpQuery {
    /// `host:port`
    pub address: String,
    pub community: String,
    pub version: SnmpVersion,
    pub oid: String,
}

impl SnmpQuery {
    /// Arguments for net-snmp `snmpget`, printing the bare value only.
    ///
    /// Retries are disabled (`-r 0`); retrying is decided by the poller.
    pub fn snmpget_args(&self, timeout: Duration) -> Vec<String> {
        vec![
            "-v".to_string(),
            self.version.as_str().to_string(),
            "-c".to_string(),
            self.community.clone(),
            "-t".to_string(),
            format_secs(timeout),
            "-r".to_string(),
            "0".to_string(),
            "-Oqv".to_string(),
            self.address.clone(),
            self.oid.clone(),
        ]
    }
}

fn format_secs(d: Duration) -> String {
    let s = format!("{:.3}", d.as_secs_f64());
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Turns a (target, OID) pair into a transport query
pub trait QueryBuilder: Send + Sync {
    fn build(&self, target: &TargetDescriptor, value_id: &str) -> SnmpQuery;
}

/// Builds plain SNMP GET queries from the target's address and community
#[derive(Debug, Clone, Copy, Default)]
pub struct SnmpGetBuilder;

impl QueryBuilder for SnmpGetBuilder {
    fn build(&self, target: &TargetDescriptor, value_id: &str) -> SnmpQuery {
        SnmpQuery {
            address: target.address.clone(),
            community: target.credential.clone(),
            version: target.version,
            oid: value_id.trim().to_string(),
        }
    }
}
