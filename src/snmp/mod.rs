use std::sync::Arc;

pub mod command;
pub mod executor;
pub mod oid;
pub mod query;
pub mod v2c;

pub use command::CommandExecutor;
pub use executor::{ExecOutcome, QueryExecutor};
pub use oid::parse_oid;
pub use query::{QueryBuilder, SnmpGetBuilder, SnmpQuery};
pub use v2c::SessionExecutor;

use crate::config::{AppConfig, ExecutorKind};

/// Picks the executor named in the configuration
pub fn create_executor(config: &AppConfig) -> Arc<dyn QueryExecutor> {
    match config.executor {
        ExecutorKind::Session => Arc::new(SessionExecutor),
        ExecutorKind::Command => Arc::new(CommandExecutor::new(&config.snmpget)),
    }
}
