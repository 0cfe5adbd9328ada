//! Low-level wrapper around the Govee Platform API
//!
//! Every call carries the `Govee-API-Key` header and a freshly generated
//! `requestId`. Responses use an envelope with a `code` field; 200 means
//! success regardless of the HTTP status.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tracing::error;
use uuid::Uuid;

use crate::error::{BridgeError, Result};
use crate::protocol::{
    CapabilityCommand, ControlPayload, ControlRequest, DeviceRecord, DeviceRef,
    DeviceStateResponse, StatePayload, StateRequest, CODE_OK,
};
use crate::types::{DeviceId, PowerAction};

const API_KEY_HEADER: &str = "Govee-API-Key";

pub struct GoveeClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl GoveeClient {
    pub fn new(api_base: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// `GET /router/api/v1/user/devices`
    ///
    /// A rejected listing (non-success HTTP status or envelope code) fails
    /// with the raw upstream payload attached, so it can surface as a 502
    /// with details.
    pub async fn list_devices(&self) -> Result<Vec<DeviceRecord>> {
        let response = self
            .http
            .get(self.url("/router/api/v1/user/devices"))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Govee list devices returned HTTP {status}: {body}");
            return Err(BridgeError::DiscoveryFailed {
                details: json!({ "status": status.as_u16(), "body": body }),
            });
        }

        let envelope: Value = response.json().await?;
        let code = envelope.get("code").and_then(Value::as_i64).unwrap_or(0);
        if code != CODE_OK {
            error!("Govee list devices failed: {envelope}");
            return Err(BridgeError::DiscoveryFailed { details: envelope });
        }

        let data = envelope.get("data").cloned().unwrap_or_else(|| json!([]));
        Ok(serde_json::from_value(data)?)
    }

    /// `POST /router/api/v1/device/state`
    pub async fn device_state(&self, id: &DeviceId) -> Result<StatePayload> {
        let body = StateRequest {
            request_id: Self::request_id(),
            payload: DeviceRef {
                sku: id.sku.clone(),
                device: id.device.clone(),
            },
        };

        let response = self
            .http
            .post(self.url("/router/api/v1/device/state"))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::Upstream(format!(
                "Govee API error {status}: {body}"
            )));
        }

        let envelope: DeviceStateResponse = response.json().await?;
        if envelope.code != CODE_OK {
            return Err(BridgeError::Upstream(format!(
                "Govee state failed: code {} ({})",
                envelope.code,
                envelope.msg.unwrap_or_default()
            )));
        }

        Ok(envelope.payload)
    }

    /// `POST /router/api/v1/device/control` - write the power switch
    /// capability. The updated state is not read here; callers follow up
    /// with [`device_state`](Self::device_state).
    pub async fn set_power(&self, id: &DeviceId, action: PowerAction) -> Result<()> {
        let body = ControlRequest {
            request_id: Self::request_id(),
            payload: ControlPayload {
                sku: id.sku.clone(),
                device: id.device.clone(),
                capability: CapabilityCommand::power(action.value()),
            },
        };

        let response = self
            .http
            .post(self.url("/router/api/v1/device/control"))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::Upstream(format!(
                "Govee API error {status}: {body}"
            )));
        }

        Ok(())
    }
}
