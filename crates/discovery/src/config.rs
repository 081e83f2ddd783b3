//! Discovery timing configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hold period in idle before the next request, in milliseconds.
pub const IDLE_TIMEOUT_MS: u64 = 10_000;

/// Time to collect responses after a request went out, in milliseconds.
pub const WAIT_RESPONSE_TIMEOUT_MS: u64 = 10_000;

/// Delay between start and the first request, in milliseconds.
pub const STARTUP_DELAY_MS: u64 = 1_000;

/// Timer durations for the discovery cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Delay between `start()` and the first request.
    pub startup_delay: Duration,

    /// Hold period in idle before (re)issuing a request.
    ///
    /// Also used as the retry delay after a rejected submission or a
    /// failed delivery.
    pub idle_timeout: Duration,

    /// How long to collect responses after a request was accepted.
    pub wait_response_timeout: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            startup_delay: Duration::from_millis(STARTUP_DELAY_MS),
            idle_timeout: Duration::from_millis(IDLE_TIMEOUT_MS),
            wait_response_timeout: Duration::from_millis(WAIT_RESPONSE_TIMEOUT_MS),
        }
    }
}

impl DiscoveryConfig {
    /// Create a config with custom idle and wait periods.
    pub fn with_timeouts(idle_timeout: Duration, wait_response_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            wait_response_timeout,
            ..Default::default()
        }
    }

    /// Override the start-up delay.
    pub fn with_startup_delay(mut self, startup_delay: Duration) -> Self {
        self.startup_delay = startup_delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.startup_delay, Duration::from_secs(1));
        assert_eq!(config.idle_timeout, Duration::from_secs(10));
        assert_eq!(config.wait_response_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_builders() {
        let config =
            DiscoveryConfig::with_timeouts(Duration::from_secs(2), Duration::from_secs(3))
                .with_startup_delay(Duration::ZERO);
        assert_eq!(config.idle_timeout, Duration::from_secs(2));
        assert_eq!(config.wait_response_timeout, Duration::from_secs(3));
        assert_eq!(config.startup_delay, Duration::ZERO);
    }
}
