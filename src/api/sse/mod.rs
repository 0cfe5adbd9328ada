//! SSE (Server-Sent Events) surface
//!
//! Push channel for live device updates. Clients open `GET /events` and
//! receive `connected`, periodic `keepalive`, and state-change events until
//! they disconnect.

pub mod broadcaster;
pub mod handler;

use axum::response::sse::Event;
use serde_json::{json, Value};

use crate::types::DeviceView;

/// One event pushed to connected clients: a type tag plus an arbitrary
/// JSON payload. On the wire it becomes the standard text-event-stream
/// framing (`event: <type>` / `data: <json>` / blank line).
#[derive(Debug, Clone)]
pub struct PushEvent {
    pub kind: String,
    pub data: Value,
}

impl PushEvent {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    /// First frame written to every new session.
    pub fn connected() -> Self {
        Self::new("connected", json!({ "message": "Connected to event stream" }))
    }

    /// Per-session heartbeat carrying the current wall-clock timestamp.
    pub fn keepalive() -> Self {
        Self::new(
            "keepalive",
            json!({ "timestamp": chrono::Utc::now().to_rfc3339() }),
        )
    }

    /// A device changed state after a successful control call.
    pub fn state_change(action: &str, view: &DeviceView) -> Self {
        Self::new(
            "govee_state_change",
            json!({ "deviceId": view.id, "action": action, "state": view }),
        )
    }

    /// Render into the framework's SSE frame.
    pub fn to_sse(&self) -> Event {
        Event::default().event(&self.kind).data(self.data.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeviceId, PowerState};

    #[test]
    fn test_connected_event_shape() {
        let event = PushEvent::connected();
        assert_eq!(event.kind, "connected");
        assert_eq!(event.data["message"], "Connected to event stream");
    }

    #[test]
    fn test_keepalive_carries_timestamp() {
        let event = PushEvent::keepalive();
        assert_eq!(event.kind, "keepalive");
        assert!(event.data["timestamp"].is_string());
    }

    #[test]
    fn test_state_change_payload() {
        let id = DeviceId::new("H6159", "AA:BB");
        let view = DeviceView::new(&id, None, PowerState::On, Some(true));
        let event = PushEvent::state_change("on", &view);

        assert_eq!(event.kind, "govee_state_change");
        assert_eq!(event.data["deviceId"], "H6159|AA:BB");
        assert_eq!(event.data["action"], "on");
        assert_eq!(event.data["state"]["state"], "on");
    }
}
