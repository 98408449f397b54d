use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::collector::TargetDescriptor;

pub mod settings;
pub mod target;

pub use settings::{DEFAULT_LISTEN, Defaults, ExecutorKind};
pub use target::TargetEntry;

/// Problems found before any polling starts
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse YAML: {0}")]
    Parse(#[from] serde_yml::Error),

    #[error("missing targets")]
    MissingTargets,

    #[error("target #{index} is missing {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("target '{name}' has no OIDs")]
    EmptyOids { name: String },

    #[error("target '{name}' has an invalid OID '{oid}'")]
    InvalidOid { name: String, oid: String },

    #[error("target '{name}' has an invalid {field}: {reason}")]
    InvalidTunable {
        name: String,
        field: &'static str,
        reason: String,
    },

    #[error("target '{0}' is defined more than once")]
    DuplicateTarget(String),
}

/// The file as written, before defaults are merged
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    defaults: Defaults,
    #[serde(default)]
    executor: ExecutorKind,
    snmpget: Option<String>,
    listen: Option<String>,
    #[serde(default)]
    targets: Vec<TargetEntry>,
}

/// Application configuration with every target fully resolved
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub defaults: Defaults,
    pub executor: ExecutorKind,
    /// Program run by the command executor
    pub snmpget: String,
    /// Address `serve` binds to
    pub listen: String,
    pub targets: Vec<TargetDescriptor>,
}

impl AppConfig {
    /// Loads the YAML file, applies `SNMP_*` environment overrides to the
    /// defaults and resolves every target.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&content, |key| env::var(key).ok())
    }

    /// Parses `content`, taking overrides from `lookup`.
    pub fn from_yaml(
        content: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut raw: RawConfig = serde_yml::from_str(content)?;
        apply_env_overrides(&mut raw.defaults, lookup);

        if raw.targets.is_empty() {
            return Err(ConfigError::MissingTargets);
        }

        let mut targets: Vec<TargetDescriptor> = Vec::with_capacity(raw.targets.len());
        for (index, entry) in raw.targets.iter().enumerate() {
            let target = entry.resolve(index, &raw.defaults)?;
            if targets.iter().any(|t| t.name == target.name) {
                return Err(ConfigError::DuplicateTarget(target.name));
            }
            targets.push(target);
        }

        Ok(Self {
            defaults: raw.defaults,
            executor: raw.executor,
            snmpget: raw.snmpget.unwrap_or_else(|| "snmpget".to_string()),
            listen: raw.listen.unwrap_or_else(|| DEFAULT_LISTEN.to_string()),
            targets,
        })
    }

    pub fn target(&self, name: &str) -> Option<&TargetDescriptor> {
        self.targets.iter().find(|t| t.name == name)
    }
}

fn apply_env_overrides(defaults: &mut Defaults, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SNMP_TIMEOUT") {
        match v.parse() {
            Ok(secs) => defaults.timeout = secs,
            Err(_) => warn!(value = %v, "Ignoring unparseable SNMP_TIMEOUT"),
        }
    }
    if let Some(v) = lookup("SNMP_BUDGET") {
        match v.parse() {
            Ok(secs) => defaults.budget = secs,
            Err(_) => warn!(value = %v, "Ignoring unparseable SNMP_BUDGET"),
        }
    }
    if let Some(v) = lookup("SNMP_RETRIES") {
        match v.parse() {
            Ok(retries) => defaults.retries = retries,
            Err(_) => warn!(value = %v, "Ignoring unparseable SNMP_RETRIES"),
        }
    }
}
