use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use snmp2::{AsyncSession, Value};
use tokio::time::{Instant, timeout};

use super::{ExecOutcome, QueryExecutor, SnmpQuery, parse_oid};
use crate::collector::SnmpVersion;

const STARTING_REQ_ID: i32 = 2;

/// Executes queries over an in-process SNMP v1/v2c UDP session.
///
/// A fresh session is opened per call, so a lost or late datagram from a
/// previous attempt can never be mistaken for the answer to the next one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionExecutor;

impl SessionExecutor {
    async fn get(query: &SnmpQuery) -> Result<std::result::Result<String, String>> {
        let oid = parse_oid(&query.oid)?;
        let community = query.community.as_bytes();

        let mut session = match query.version {
            SnmpVersion::V1 => {
                AsyncSession::new_v1(query.address.as_str(), community, STARTING_REQ_ID).await
            }
            SnmpVersion::V2c => {
                AsyncSession::new_v2c(query.address.as_str(), community, STARTING_REQ_ID).await
            }
        }
        .context("Cannot create SNMP session")?;

        let resp = session
            .get(&oid)
            .await
            .map_err(|e| anyhow::anyhow!("SNMP GET failed: {:?}", e))?;

        if resp.error_status != 0 {
            return Ok(Err(format!(
                "SNMP error status {} at index {}",
                resp.error_status, resp.error_index
            )));
        }

        let (_, value) = resp
            .varbinds
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Empty SNMP response"))?;

        Ok(match value {
            Value::NoSuchObject => Err("No Such Object available at this OID".to_string()),
            Value::NoSuchInstance => Err("No Such Instance at this OID".to_string()),
            Value::EndOfMibView => Err("End of MIB view".to_string()),
            other => Ok(format!("{:?}", other)),
        })
    }
}

#[async_trait]
impl QueryExecutor for SessionExecutor {
    async fn execute(&self, query: &SnmpQuery, limit: Duration) -> ExecOutcome {
        let start = Instant::now();

        match timeout(limit, Self::get(query)).await {
            Ok(Ok(Ok(value))) => ExecOutcome::success(value, start.elapsed()),
            Ok(Ok(Err(agent_error))) => ExecOutcome::other(agent_error, start.elapsed()),
            Ok(Err(e)) => ExecOutcome::other(format!("{:#}", e), start.elapsed()),
            Err(_) => ExecOutcome::timeout(
                format!("Timeout: No Response from {}", query.address),
                start.elapsed(),
            ),
        }
    }
}
