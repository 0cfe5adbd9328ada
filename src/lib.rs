//! Govee Bridge
//!
//! A small HTTP proxy that forwards smart-home device commands to the Govee
//! Platform API, caches device listings, and rebroadcasts state changes to
//! browser clients over Server-Sent Events.
//!
//! # Modules
//!
//! - `types`: device views and composite id / action parsing
//! - `protocol`: the upstream Govee Platform API wire contract
//! - `proxy`: the device proxy (upstream client + orchestration)
//! - `cache`: TTL-bounded snapshot of the discovered device list
//! - `api`: the HTTP surface (REST endpoints + SSE push channel)
//! - `config`: environment-driven runtime configuration
//! - `error`: crate error type and its HTTP mapping

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod protocol;
pub mod proxy;
pub mod types;

// Re-export commonly used items at crate root
pub use api::sse::broadcaster::EventBroadcaster;
pub use api::sse::PushEvent;
pub use api::AppState;
pub use cache::DeviceCache;
pub use config::Config;
pub use error::{BridgeError, Result};
pub use proxy::{DeviceProxy, GoveeClient};
pub use types::{DeviceId, DeviceView, PowerAction, PowerState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
