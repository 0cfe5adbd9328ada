//! Govee Platform API wire contract
//!
//! Request and response shapes for the upstream vendor API under
//! `/router/api/v1`. This contract is externally defined; the bridge only
//! consumes it.
//!
//! ## Calls
//! - `GET /router/api/v1/user/devices` - list devices
//! - `POST /router/api/v1/device/state` - read one device's capabilities
//! - `POST /router/api/v1/device/control` - write one capability

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Capability type tag carrying the online flag
pub const CAP_ONLINE: &str = "devices.capabilities.online";
/// Capability type tag for on/off control
pub const CAP_ON_OFF: &str = "devices.capabilities.on_off";
/// Instance name of the power switch capability
pub const INSTANCE_POWER_SWITCH: &str = "powerSwitch";
/// Envelope code signalling success
pub const CODE_OK: i64 = 200;

/// One entry in the upstream device list. Identity data only - this is
/// exactly what the device cache stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub sku: String,
    pub device: String,
    #[serde(rename = "deviceName", default)]
    pub device_name: Option<String>,
}

/// Envelope of `POST /device/state`
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceStateResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub payload: StatePayload,
}

/// State payload: the device's identity plus its capability list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatePayload {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub device: String,
    #[serde(rename = "deviceName", default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

/// A vendor-defined typed attribute carried in state responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub state: CapabilityState,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilityState {
    #[serde(default)]
    pub value: Value,
}

/// Body of `POST /device/state`
#[derive(Debug, Serialize)]
pub struct StateRequest {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub payload: DeviceRef,
}

/// `{sku, device}` addressing pair used by state queries
#[derive(Debug, Serialize)]
pub struct DeviceRef {
    pub sku: String,
    pub device: String,
}

/// Body of `POST /device/control`
#[derive(Debug, Serialize)]
pub struct ControlRequest {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub payload: ControlPayload,
}

#[derive(Debug, Serialize)]
pub struct ControlPayload {
    pub sku: String,
    pub device: String,
    pub capability: CapabilityCommand,
}

/// Capability write: `{type, instance, value}`
#[derive(Debug, Serialize)]
pub struct CapabilityCommand {
    #[serde(rename = "type")]
    pub kind: String,
    pub instance: String,
    pub value: u8,
}

impl CapabilityCommand {
    /// Power switch write; Govee uses 1 for on, 0 for off.
    pub fn power(value: u8) -> Self {
        Self {
            kind: CAP_ON_OFF.to_string(),
            instance: INSTANCE_POWER_SWITCH.to_string(),
            value,
        }
    }
}
