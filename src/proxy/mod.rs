//! Device proxy
//!
//! Stateless translation between the bridge's HTTP surface and the Govee
//! Platform API. Each operation produces a fresh result from upstream
//! calls; the identity cache is the only shared resource.

mod client;

pub use client::GoveeClient;

use futures::future::join_all;
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::DeviceCache;
use crate::error::Result;
use crate::protocol::{Capability, DeviceRecord, StatePayload, CAP_ONLINE, CAP_ON_OFF, INSTANCE_POWER_SWITCH};
use crate::types::{DeviceId, DeviceView, PowerAction, PowerState};

pub struct DeviceProxy {
    client: GoveeClient,
    cache: DeviceCache,
}

impl DeviceProxy {
    pub fn new(client: GoveeClient, cache: DeviceCache) -> Self {
        Self { client, cache }
    }

    /// Run discovery: list devices from upstream, cache their identities,
    /// and resolve live state for each one.
    pub async fn discover(&self) -> Result<Vec<DeviceView>> {
        let records = self.client.list_devices().await?;
        info!("discovered {} Govee device(s)", records.len());

        self.cache.put(records.clone());
        Ok(self.resolve_all(&records).await)
    }

    /// Cached devices with freshly resolved state, or `None` when the cache
    /// is empty or expired (the caller redirects to discovery; there is no
    /// automatic re-discovery here).
    pub async fn list_cached(&self) -> Option<Vec<DeviceView>> {
        let records = self.cache.get()?;
        Some(self.resolve_all(&records).await)
    }

    /// Write the power switch capability, then re-read state so the caller
    /// sees the updated view. No retry on upstream failure.
    pub async fn control(&self, id: &DeviceId, action: PowerAction) -> Result<DeviceView> {
        info!("control {} -> {}", id, action.as_str());
        self.client.set_power(id, action).await?;

        let payload = self.client.device_state(id).await?;
        Ok(view_from_payload(id, None, payload))
    }

    /// Resolve live state for every record. Lookups run concurrently,
    /// unbounded by device count; results keep input order.
    async fn resolve_all(&self, records: &[DeviceRecord]) -> Vec<DeviceView> {
        join_all(records.iter().map(|record| self.resolve_one(record))).await
    }

    /// A failed state lookup degrades this one device to unknown/null
    /// instead of failing the whole listing.
    async fn resolve_one(&self, record: &DeviceRecord) -> DeviceView {
        let id = DeviceId::new(record.sku.clone(), record.device.clone());
        match self.client.device_state(&id).await {
            Ok(payload) => view_from_payload(&id, record.device_name.clone(), payload),
            Err(e) => {
                warn!("failed to fetch state for {}: {}", id, e);
                DeviceView::unresolved(&id, record.device_name.clone())
            }
        }
    }
}

/// Build a device view from a state payload. The name reported with the
/// state wins over the one from the device listing.
fn view_from_payload(id: &DeviceId, listed_name: Option<String>, payload: StatePayload) -> DeviceView {
    let (state, online) = fold_capabilities(&payload.capabilities);
    let name = payload.device_name.or(listed_name);
    DeviceView::new(id, name, state, online)
}

/// Fold an upstream capability list into a power state and an online flag.
///
/// The online capability sets the flag from its (truthy) value; the
/// powerSwitch capability maps value 1 to `on` and anything else to `off`.
/// Capabilities matching neither tag are ignored; absent both, the state
/// stays `unknown` and the flag stays null.
fn fold_capabilities(capabilities: &[Capability]) -> (PowerState, Option<bool>) {
    let mut state = PowerState::Unknown;
    let mut online = None;

    for cap in capabilities {
        if cap.kind == CAP_ONLINE {
            online = Some(truthy(&cap.state.value));
        }
        if cap.kind == CAP_ON_OFF && cap.instance.as_deref() == Some(INSTANCE_POWER_SWITCH) {
            state = if cap.state.value.as_i64() == Some(1) {
                PowerState::On
            } else {
                PowerState::Off
            };
        }
    }

    (state, online)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::CapabilityState;
    use serde_json::json;

    fn cap(kind: &str, instance: Option<&str>, value: Value) -> Capability {
        Capability {
            kind: kind.to_string(),
            instance: instance.map(String::from),
            state: CapabilityState { value },
        }
    }

    #[test]
    fn test_online_true_and_power_one_resolve_to_on() {
        let caps = vec![
            cap(CAP_ONLINE, Some("online"), json!(true)),
            cap(CAP_ON_OFF, Some(INSTANCE_POWER_SWITCH), json!(1)),
        ];
        let (state, online) = fold_capabilities(&caps);
        assert_eq!(state, PowerState::On);
        assert_eq!(online, Some(true));
    }

    #[test]
    fn test_power_zero_resolves_to_off() {
        let caps = vec![cap(CAP_ON_OFF, Some(INSTANCE_POWER_SWITCH), json!(0))];
        let (state, online) = fold_capabilities(&caps);
        assert_eq!(state, PowerState::Off);
        assert_eq!(online, None);
    }

    #[test]
    fn test_non_one_power_value_resolves_to_off() {
        let caps = vec![cap(CAP_ON_OFF, Some(INSTANCE_POWER_SWITCH), json!(7))];
        let (state, _) = fold_capabilities(&caps);
        assert_eq!(state, PowerState::Off);
    }

    #[test]
    fn test_empty_capability_list_stays_unknown() {
        let (state, online) = fold_capabilities(&[]);
        assert_eq!(state, PowerState::Unknown);
        assert_eq!(online, None);
    }

    #[test]
    fn test_unrelated_capabilities_are_ignored() {
        let caps = vec![cap("devices.capabilities.color_setting", Some("colorRgb"), json!(255))];
        let (state, online) = fold_capabilities(&caps);
        assert_eq!(state, PowerState::Unknown);
        assert_eq!(online, None);
    }

    #[test]
    fn test_on_off_without_power_switch_instance_is_ignored() {
        let caps = vec![cap(CAP_ON_OFF, Some("nightLightToggle"), json!(1))];
        let (state, _) = fold_capabilities(&caps);
        assert_eq!(state, PowerState::Unknown);
    }

    #[test]
    fn test_online_numeric_value_is_truthy() {
        let caps = vec![cap(CAP_ONLINE, Some("online"), json!(0))];
        let (_, online) = fold_capabilities(&caps);
        assert_eq!(online, Some(false));
    }

    #[test]
    fn test_state_name_wins_over_listed_name() {
        let id = DeviceId::new("H6159", "AA:BB");
        let payload = StatePayload {
            sku: "H6159".to_string(),
            device: "AA:BB".to_string(),
            device_name: Some("Desk strip".to_string()),
            capabilities: vec![],
        };
        let view = view_from_payload(&id, Some("Old name".to_string()), payload);
        assert_eq!(view.name.as_deref(), Some("Desk strip"));
        assert_eq!(view.id, "H6159|AA:BB");
    }
}
