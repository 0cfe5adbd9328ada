//! Device view types exposed by the bridge's own HTTP surface

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Separator between SKU and vendor device id in the composite key
pub const ID_SEPARATOR: char = '|';

/// Power state as resolved from the vendor's powerSwitch capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
    Unknown,
}

impl PowerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerState::On => "on",
            PowerState::Off => "off",
            PowerState::Unknown => "unknown",
        }
    }
}

/// Requested power action, parsed case-insensitively from the URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    On,
    Off,
}

impl PowerAction {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "on" => Ok(PowerAction::On),
            "off" => Ok(PowerAction::Off),
            _ => Err(BridgeError::Validation(
                "Invalid action. Use 'on' or 'off'".to_string(),
            )),
        }
    }

    /// Wire value for the power switch capability: 1 = on, 0 = off.
    pub fn value(&self) -> u8 {
        match self {
            PowerAction::On => 1,
            PowerAction::Off => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerAction::On => "on",
            PowerAction::Off => "off",
        }
    }
}

/// Composite device key: `<sku>|<device>`, the only externally exposed
/// identifier. Must split into exactly two non-empty parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceId {
    pub sku: String,
    pub device: String,
}

impl DeviceId {
    pub fn new(sku: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            device: device.into(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split(ID_SEPARATOR).collect();
        match parts.as_slice() {
            [sku, device] if !sku.is_empty() && !device.is_empty() => {
                Ok(Self::new(*sku, *device))
            }
            _ => Err(BridgeError::Validation(
                "Invalid device ID format".to_string(),
            )),
        }
    }

    /// The composite form written into every device view.
    pub fn composite(&self) -> String {
        format!("{}{}{}", self.sku, ID_SEPARATOR, self.device)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.sku, ID_SEPARATOR, self.device)
    }
}

/// Flat device view returned by every proxy operation.
///
/// Constructed fresh on each call by folding the upstream capability list;
/// never persisted beyond the identity cache, never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceView {
    pub id: String,
    pub name: Option<String>,
    pub model: String,
    pub device: String,
    pub controllable: bool,
    pub retrievable: bool,
    pub state: PowerState,
    pub online: Option<bool>,
}

impl DeviceView {
    pub fn new(
        id: &DeviceId,
        name: Option<String>,
        state: PowerState,
        online: Option<bool>,
    ) -> Self {
        Self {
            id: id.composite(),
            name,
            model: id.sku.clone(),
            device: id.device.clone(),
            controllable: true,
            retrievable: true,
            state,
            online,
        }
    }

    /// Fallback view when the per-device state lookup failed: the device is
    /// still listed, but with unknown state.
    pub fn unresolved(id: &DeviceId, name: Option<String>) -> Self {
        Self::new(id, name, PowerState::Unknown, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parses_case_insensitively() {
        assert_eq!(PowerAction::parse("ON").unwrap(), PowerAction::On);
        assert_eq!(PowerAction::parse("off").unwrap(), PowerAction::Off);
        assert_eq!(PowerAction::parse("On").unwrap(), PowerAction::On);
    }

    #[test]
    fn test_action_rejects_unknown_values() {
        assert!(PowerAction::parse("toggle").is_err());
        assert!(PowerAction::parse("").is_err());
    }

    #[test]
    fn test_action_wire_values() {
        assert_eq!(PowerAction::On.value(), 1);
        assert_eq!(PowerAction::Off.value(), 0);
    }

    #[test]
    fn test_device_id_parse() {
        let id = DeviceId::parse("H6159|AA:BB:CC").unwrap();
        assert_eq!(id.sku, "H6159");
        assert_eq!(id.device, "AA:BB:CC");
        assert_eq!(id.composite(), "H6159|AA:BB:CC");
    }

    #[test]
    fn test_device_id_rejects_malformed_input() {
        assert!(DeviceId::parse("ABC").is_err());
        assert!(DeviceId::parse("|device").is_err());
        assert!(DeviceId::parse("sku|").is_err());
        assert!(DeviceId::parse("a|b|c").is_err());
    }

    #[test]
    fn test_view_id_matches_model_and_device() {
        let id = DeviceId::new("H6159", "AA:BB");
        let view = DeviceView::new(&id, None, PowerState::On, Some(true));
        assert_eq!(view.id, format!("{}|{}", view.model, view.device));
        assert!(view.controllable);
        assert!(view.retrievable);
    }

    #[test]
    fn test_view_serializes_state_lowercase_and_null_fields() {
        let id = DeviceId::new("H6159", "AA:BB");
        let view = DeviceView::unresolved(&id, None);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["state"], "unknown");
        assert!(json["online"].is_null());
        assert!(json["name"].is_null());
    }
}
