//! SSE connection handler

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::sse::Sse;
use axum::response::IntoResponse;

use super::broadcaster::{EventBroadcaster, SessionId};
use crate::api::AppState;

/// Unregisters the session when the response stream is dropped, so a
/// disconnect is detected immediately instead of on the next failed write.
struct StreamGuard {
    broadcaster: Arc<EventBroadcaster>,
    id: SessionId,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.broadcaster.unregister(self.id);
    }
}

/// `GET /events` - open a push stream.
///
/// The first frame is always `connected`; after that the client receives
/// per-session keepalives and whatever gets broadcast.
pub async fn events_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let broadcaster = Arc::clone(&state.broadcaster);
    let (id, mut rx) = broadcaster.register();
    let guard = StreamGuard { broadcaster, id };

    let stream = async_stream::stream! {
        let _guard = guard;
        while let Some(event) = rx.recv().await {
            yield Ok::<_, Infallible>(event.to_sse());
        }
    };

    (
        [
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        Sse::new(stream),
    )
}
