//! HTTP transport configuration.

use std::{ops::RangeInclusive, time::Duration};

use serde::Deserialize;

use crate::error::{AcquiringError, Result};

/// HTTP transport settings, loaded from the `[http]` table.
///
/// ```toml
/// [http]
/// pool_max_idle_per_host = 10
/// timeout_secs = 60
/// connect_timeout_secs = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// Idle keep-alive connections kept open to the gateway host.
    #[serde(default = "HttpConfig::idle_connections")]
    pub pool_max_idle_per_host: usize,

    /// Whole-call deadline in seconds, body download included.
    #[serde(default = "HttpConfig::call_deadline")]
    pub timeout_secs: u64,

    /// TCP and TLS handshake deadline in seconds.
    #[serde(default = "HttpConfig::handshake_deadline")]
    pub connect_timeout_secs: u64,
}

/// Accepted `timeout_secs` values.
const CALL_DEADLINE_RANGE: RangeInclusive<u64> = 1..=300;
/// Accepted `connect_timeout_secs` values.
const HANDSHAKE_DEADLINE_RANGE: RangeInclusive<u64> = 1..=60;

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: Self::idle_connections(),
            timeout_secs: Self::call_deadline(),
            connect_timeout_secs: Self::handshake_deadline(),
        }
    }
}

impl HttpConfig {
    /// Checks both deadlines before the gateway client is built.
    ///
    /// # Errors
    ///
    /// Returns [`AcquiringError::Config`] naming the first deadline outside
    /// its range: 1 to 300 seconds for a call, 1 to 60 for a handshake.
    pub fn validate(&self) -> Result<()> {
        check_deadline("timeout_secs", self.timeout_secs, &CALL_DEADLINE_RANGE)?;
        check_deadline("connect_timeout_secs", self.connect_timeout_secs, &HANDSHAKE_DEADLINE_RANGE)
    }

    /// Deadline applied to every gateway call.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Deadline for opening a connection to the gateway.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    const fn idle_connections() -> usize {
        100
    }

    const fn call_deadline() -> u64 {
        30
    }

    const fn handshake_deadline() -> u64 {
        10
    }
}

fn check_deadline(key: &str, secs: u64, range: &RangeInclusive<u64>) -> Result<()> {
    if range.contains(&secs) {
        return Ok(());
    }
    Err(AcquiringError::Config(format!(
        "http.{key} is {secs}s, expected {}..={} seconds",
        range.start(),
        range.end()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.pool_max_idle_per_host, 100);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: HttpConfig = toml::from_str("timeout_secs = 5").unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = HttpConfig { timeout_secs: 0, ..HttpConfig::default() };
        assert!(matches!(config.validate().unwrap_err(), AcquiringError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_long_connect_timeout() {
        let config = HttpConfig { connect_timeout_secs: 61, ..HttpConfig::default() };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http.connect_timeout_secs is 61s"));
    }

    #[test]
    fn test_validate_accepts_range_bounds() {
        let config = HttpConfig { timeout_secs: 300, connect_timeout_secs: 1, ..HttpConfig::default() };
        assert!(config.validate().is_ok());
    }
}
