//! Command-line flags shared by the binaries.

use std::time::Duration;

use clap::Args;

use crate::config::{BridgeConfig, ConfigError, POLL_MS_ENV, QUEUE_CAPACITY_ENV};

#[derive(Args, Debug, Clone, Default)]
pub struct BridgeArgs {
    /// Maximum number of buffered input events.
    #[arg(long, env = QUEUE_CAPACITY_ENV)]
    pub queue_capacity: Option<usize>,

    /// Milliseconds between re-checks of the active window while waiting for input.
    #[arg(long = "poll-ms", env = POLL_MS_ENV)]
    pub poll_ms: Option<u64>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long = "log", default_value = "info")]
    pub log: String,
}

impl BridgeArgs {
    pub fn to_config(&self) -> Result<BridgeConfig, ConfigError> {
        let mut config = BridgeConfig::default();

        if let Some(capacity) = self.queue_capacity {
            config.queue_capacity = capacity;
        }
        if let Some(ms) = self.poll_ms {
            config.poll_interval = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        bridge: BridgeArgs,
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = TestCli::parse_from(["test", "--queue-capacity", "64", "--poll-ms", "5"]);

        let config = cli.bridge.to_config().unwrap();

        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.poll_interval, Duration::from_millis(5));
    }

    #[test]
    fn test_out_of_range_capacity_is_rejected_not_truncated() {
        let too_big = format!("{}0", usize::MAX);

        let result = TestCli::try_parse_from(["test", "--queue-capacity", too_big.as_str()]);

        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_poll_interval_is_rejected() {
        assert!(TestCli::try_parse_from(["test", "--poll-ms", "soon"]).is_err());
        assert!(TestCli::try_parse_from(["test", "--poll-ms", "-5"]).is_err());
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let args = BridgeArgs {
            queue_capacity: Some(0),
            ..BridgeArgs::default()
        };

        assert_eq!(args.to_config(), Err(ConfigError::ZeroQueueCapacity));
    }
}
