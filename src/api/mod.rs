//! HTTP API surface: REST proxy endpoints plus the SSE push channel

pub mod http;
pub mod rest;
pub mod sse;

use std::sync::Arc;

use crate::cache::DeviceCache;
use crate::config::Config;
use crate::error::Result;
use crate::proxy::{DeviceProxy, GoveeClient};
use self::sse::broadcaster::EventBroadcaster;

/// Shared application state for all handlers
pub struct AppState {
    pub proxy: DeviceProxy,
    pub broadcaster: Arc<EventBroadcaster>,
}

impl AppState {
    pub fn new(proxy: DeviceProxy, broadcaster: Arc<EventBroadcaster>) -> Self {
        Self { proxy, broadcaster }
    }

    /// Build the full application state from runtime configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GoveeClient::new(&config.api_base, &config.api_key, config.upstream_timeout)?;
        let proxy = DeviceProxy::new(client, DeviceCache::new(config.cache_ttl));
        let broadcaster = Arc::new(EventBroadcaster::new(config.keepalive_interval));
        Ok(Self::new(proxy, broadcaster))
    }
}
