//! Live-update broadcaster
//!
//! Owns the set of open push sessions. A session is registered when a
//! client opens the event stream and removed on the first failed write or
//! when the transport closes. Each session gets its own heartbeat task,
//! aborted exactly once when the session is unregistered.
//!
//! A write failure is read solely as "client disconnected": no retry, the
//! session is discarded unconditionally and never re-added.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::PushEvent;

/// Session identifier, used for logs and targeted removal
pub type SessionId = u64;

struct Session {
    tx: mpsc::UnboundedSender<PushEvent>,
    heartbeat: JoinHandle<()>,
}

/// Fan-out broadcaster over all open event streams.
///
/// The registry lock is never held across an await; all writes go through
/// per-session channels, so `broadcast_all` is synchronous.
pub struct EventBroadcaster {
    sessions: Mutex<HashMap<SessionId, Session>>,
    next_id: AtomicU64,
    keepalive_interval: Duration,
}

impl EventBroadcaster {
    pub fn new(keepalive_interval: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
            keepalive_interval,
        }
    }

    /// Register a new session. The returned receiver feeds the client's
    /// response body; a `connected` event is queued ahead of registration
    /// so no heartbeat or broadcast can precede it.
    pub fn register(self: &Arc<Self>) -> (SessionId, mpsc::UnboundedReceiver<PushEvent>) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::unbounded_channel();

        let _ = tx.send(PushEvent::connected());
        let heartbeat = self.spawn_heartbeat(id, tx.clone());

        let total = {
            let mut sessions = self.sessions.lock();
            sessions.insert(id, Session { tx, heartbeat });
            sessions.len()
        };
        info!("event stream client connected (session {id}, total {total})");

        (id, rx)
    }

    /// Remove a session and cancel its heartbeat. Idempotent; a session is
    /// never re-added once removed.
    pub fn unregister(&self, id: SessionId) {
        let removed = {
            let mut sessions = self.sessions.lock();
            let removed = sessions.remove(&id);
            removed.map(|session| (session, sessions.len()))
        };

        if let Some((session, remaining)) = removed {
            session.heartbeat.abort();
            info!("event stream client removed (session {id}, remaining {remaining})");
        }
    }

    /// One best-effort pass over every registered session. Sessions whose
    /// write fails are collected during the pass and removed after it
    /// completes, so the set is not mutated mid-iteration.
    pub fn broadcast_all(&self, event: PushEvent) {
        let mut dead = Vec::new();
        {
            let sessions = self.sessions.lock();
            for (id, session) in sessions.iter() {
                if session.tx.send(event.clone()).is_err() {
                    dead.push(*id);
                }
            }
        }

        for id in dead {
            warn!("dropping dead event stream session {id}");
            self.unregister(id);
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    /// One independently cancellable heartbeat per session. A failed write
    /// removes the session and ends the task.
    fn spawn_heartbeat(
        self: &Arc<Self>,
        id: SessionId,
        tx: mpsc::UnboundedSender<PushEvent>,
    ) -> JoinHandle<()> {
        let broadcaster = Arc::clone(self);
        let interval = self.keepalive_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; skip it so the
            // `connected` frame is the only thing a fresh session sees.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if tx.send(PushEvent::keepalive()).is_err() {
                    debug!("heartbeat write failed for session {id}");
                    broadcaster.unregister(id);
                    break;
                }
            }
        })
    }
}
