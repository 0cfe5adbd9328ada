//! Runtime configuration
//!
//! All settings come from the environment; only the Govee API key is
//! required.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{BridgeError, Result};

/// Production endpoint of the Govee Platform API
pub const DEFAULT_API_BASE: &str = "https://openapi.api.govee.com";

/// Bridge configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Govee Platform API key, sent as the `Govee-API-Key` header
    pub api_key: String,
    /// Upstream base URL (overridable for testing)
    pub api_base: String,
    /// HTTP listen address
    pub bind_addr: SocketAddr,
    /// How long the discovered device list stays valid
    pub cache_ttl: Duration,
    /// Interval between per-session keepalive events
    pub keepalive_interval: Duration,
    /// Timeout applied to every upstream call
    pub upstream_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `GOVEE_API_KEY` | required |
    /// | `GOVEE_API_BASE` | `https://openapi.api.govee.com` |
    /// | `BIND_ADDR` | `0.0.0.0:8080` |
    /// | `DEVICE_CACHE_TTL_SECS` | `3600` |
    /// | `KEEPALIVE_INTERVAL_SECS` | `30` |
    /// | `UPSTREAM_TIMEOUT_SECS` | `10` |
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GOVEE_API_KEY").map_err(|_| {
            BridgeError::Config("GOVEE_API_KEY environment variable is not set".to_string())
        })?;

        let api_base =
            env::var("GOVEE_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .map_err(|e| BridgeError::Config(format!("invalid BIND_ADDR: {e}")))?;

        Ok(Self {
            api_key,
            api_base,
            bind_addr,
            cache_ttl: secs_from_env("DEVICE_CACHE_TTL_SECS", 3600)?,
            keepalive_interval: secs_from_env("KEEPALIVE_INTERVAL_SECS", 30)?,
            upstream_timeout: secs_from_env("UPSTREAM_TIMEOUT_SECS", 10)?,
        })
    }
}

fn secs_from_env(name: &str, default: u64) -> Result<Duration> {
    parse_secs(name, env::var(name).ok(), default)
}

fn parse_secs(name: &str, raw: Option<String>, default: u64) -> Result<Duration> {
    match raw {
        Some(value) => value
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| BridgeError::Config(format!("invalid {name}: '{value}'"))),
        None => Ok(Duration::from_secs(default)),
    }
}
