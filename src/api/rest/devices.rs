//! Device proxy endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;

use crate::api::sse::PushEvent;
use crate::api::AppState;
use crate::error::Result;
use crate::types::{DeviceId, PowerAction};

/// `POST /govee/discover` - fetch devices from the Govee cloud and return
/// them with their current state.
pub async fn discover(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let devices = state.proxy.discover().await?;
    Ok(Json(devices))
}

/// `GET /govee/devices` - list cached devices with fresh state. With no
/// usable cache entry the caller is redirected to re-run discovery.
pub async fn list(State(state): State<Arc<AppState>>) -> Response {
    match state.proxy.list_cached().await {
        Some(devices) => Json(devices).into_response(),
        None => Redirect::temporary("/govee/discover").into_response(),
    }
}

/// `POST /govee/devices/:deviceId/:action` - turn a device on or off and
/// return its freshly resolved view. A successful control is rebroadcast
/// to every open event stream.
pub async fn control(
    State(state): State<Arc<AppState>>,
    Path((device_id, action)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let action = PowerAction::parse(&action)?;
    let id = DeviceId::parse(&device_id)?;

    let view = state.proxy.control(&id, action).await?;
    state
        .broadcaster
        .broadcast_all(PushEvent::state_change(action.as_str(), &view));

    Ok(Json(view))
}
