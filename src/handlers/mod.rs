use std::sync::Arc;

use crate::collector::TargetPoller;
use crate::config::AppConfig;

pub mod health;
pub mod poll;

pub use health::health;
pub use poll::{list_targets, poll_adhoc, poll_target};

/// Shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub poller: Arc<TargetPoller>,
}
