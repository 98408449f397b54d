use std::net::{Ipv6Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use super::settings::{Defaults, MAX_RETRIES};
use crate::collector::{SnmpVersion, TargetDescriptor};
use crate::snmp::parse_oid;

/// One `targets:` entry as written in the file. Every field is optional
/// here so that missing ones can be reported by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetEntry {
    pub name: Option<String>,
    pub ip: Option<String>,
    pub community: Option<String>,
    pub oids: Option<Vec<String>>,
    pub port: Option<u16>,
    pub version: Option<SnmpVersion>,
    pub budget: Option<f64>,
    pub timeout: Option<f64>,
    pub retries: Option<u32>,
}

impl TargetEntry {
    /// Validates the entry and merges `defaults` under its own settings.
    pub fn resolve(&self, index: usize, defaults: &Defaults) -> Result<TargetDescriptor, ConfigError> {
        let name = required(&self.name, index, "name")?;
        let ip = required(&self.ip, index, "ip")?;
        let community = required(&self.community, index, "community")?;
        let oids = self
            .oids
            .as_ref()
            .ok_or(ConfigError::MissingField { index, field: "oids" })?;

        if oids.is_empty() {
            return Err(ConfigError::EmptyOids { name: name.clone() });
        }
        let mut value_ids = Vec::with_capacity(oids.len());
        for oid in oids {
            let oid = oid.trim();
            if parse_oid(oid).is_err() {
                return Err(ConfigError::InvalidOid {
                    name: name.clone(),
                    oid: oid.to_string(),
                });
            }
            if !value_ids.iter().any(|v| v == oid) {
                value_ids.push(oid.to_string());
            }
        }

        let budget = seconds(name, "budget", self.budget.unwrap_or(defaults.budget))?;
        let timeout = seconds(name, "timeout", self.timeout.unwrap_or(defaults.timeout))?;
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTunable {
                name: name.clone(),
                field: "timeout",
                reason: "must be greater than zero".to_string(),
            });
        }
        let retries = self.retries.unwrap_or(defaults.retries);
        if retries > MAX_RETRIES {
            return Err(ConfigError::InvalidTunable {
                name: name.clone(),
                field: "retries",
                reason: format!("must be at most {}", MAX_RETRIES),
            });
        }

        Ok(TargetDescriptor {
            name: name.clone(),
            address: socket_address(ip.trim(), self.port.unwrap_or(defaults.port)),
            credential: community.clone(),
            version: self.version.unwrap_or(defaults.version),
            value_ids,
            budget,
            timeout,
            retries,
        })
    }
}

fn required<'a>(
    value: &'a Option<String>,
    index: usize,
    field: &'static str,
) -> Result<&'a String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField { index, field }),
    }
}

fn seconds(name: &str, field: &'static str, secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::InvalidTunable {
        name: name.to_string(),
        field,
        reason: e.to_string(),
    })
}

/// `ip` may already carry a port; bare IPv6 literals get bracketed.
fn socket_address(ip: &str, port: u16) -> String {
    if ip.parse::<SocketAddr>().is_ok() {
        ip.to_string()
    } else if ip.parse::<Ipv6Addr>().is_ok() {
        format!("[{}]:{}", ip, port)
    } else {
        format!("{}:{}", ip, port)
    }
}
