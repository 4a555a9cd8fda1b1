//! Runtime configuration for the GUI and user threads.

use std::time::Duration;
use thiserror::Error;

use crate::core::event_queue::DEFAULT_QUEUE_CAPACITY;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(15);
/// Environment fallbacks for the `--queue-capacity` and `--poll-ms` flags.
pub const QUEUE_CAPACITY_ENV: &str = "GFX_BRIDGE_QUEUE_CAPACITY";
pub const POLL_MS_ENV: &str = "GFX_BRIDGE_POLL_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("queue capacity must be greater than zero")]
    ZeroQueueCapacity,

    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Maximum number of queued input events before the oldest is dropped.
    pub queue_capacity: usize,
    /// How often blocking input waits re-read the active window filter.
    pub poll_interval: Duration,
    pub user_thread_name: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            poll_interval: DEFAULT_POLL_INTERVAL,
            user_thread_name: "user".to_string(),
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }

        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }

        Ok(())
    }
}
