use serde::Deserialize;

use crate::collector::SnmpVersion;
use crate::config::TargetEntry;

/// Body of an ad-hoc `POST /poll`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollRequest {
    /// Defaults to `ip`
    pub name: Option<String>,
    pub ip: String,
    pub community: String,
    pub oids: Vec<String>,
    pub port: Option<u16>,
    pub version: Option<SnmpVersion>,
    pub budget: Option<f64>,
    pub timeout: Option<f64>,
    pub retries: Option<u32>,
}

impl From<PollRequest> for TargetEntry {
    fn from(req: PollRequest) -> Self {
        TargetEntry {
            name: Some(req.name.unwrap_or_else(|| req.ip.clone())),
            ip: Some(req.ip),
            community: Some(req.community),
            oids: Some(req.oids),
            port: req.port,
            version: req.version,
            budget: req.budget,
            timeout: req.timeout,
            retries: req.retries,
        }
    }
}
