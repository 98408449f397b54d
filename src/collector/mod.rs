//! Budgeted polling of SNMP targets.

pub mod target_poller;
pub mod types;
pub mod value_poller;

#[cfg(test)]
pub(crate) mod testing;

pub use target_poller::TargetPoller;
pub use types::{
    FailureKind, SnmpVersion, TargetDescriptor, TargetReport, TargetStatus, ValueOutcome,
};
pub use value_poller::ValuePoller;
