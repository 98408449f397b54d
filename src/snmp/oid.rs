use anyhow::{Context, Result};
use snmp2::Oid;

/// Parses a dotted numeric OID such as `1.3.6.1.2.1.1.3.0`.
///
/// One leading `.` is allowed; any other empty arc is rejected.
pub fn parse_oid(s: &str) -> Result<Oid<'static>> {
    let trimmed = s.trim();
    let dotted = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if dotted.is_empty() {
        anyhow::bail!("Empty OID");
    }

    let parts: Result<Vec<u64>, _> = dotted.split('.').map(|p| p.parse::<u64>()).collect();
    let parts = parts.context(format!("Invalid OID: {}", s))?;
    Oid::from(&parts).map_err(|e| anyhow::anyhow!("Cannot encode OID {}: {:?}", s, e))
}
