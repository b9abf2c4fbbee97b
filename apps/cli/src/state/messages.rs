//! # Notification Queue
//!
//! Short-lived success/error messages.
//!
//! ## Message Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  notify(text, kind)                                                     │
//! │     │                                                                   │
//! │     ├──► push Notification { id, text, kind }                           │
//! │     └──► spawn expiry task ── sleep(lifetime) ──► remove message        │
//! │                                                                         │
//! │  dismiss(id)                                                            │
//! │     ├──► remove message (no-op when already gone)                       │
//! │     └──► abort its expiry task                                          │
//! │                                                                         │
//! │  drop(queue) ──► abort every pending expiry task                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are wall-clock milliseconds, bumped when two messages land in the
//! same millisecond, so they are unique and increasing.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use batoi_core::{NotificationKind, MESSAGE_LIFETIME_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MessageId(i64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: MessageId,
    pub text: String,
    pub kind: NotificationKind,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        write!(f, "[{}] {}", label, self.text)
    }
}

#[derive(Default)]
struct QueueState {
    messages: Vec<Notification>,
    timers: HashMap<MessageId, JoinHandle<()>>,
    last_id: i64,
}

struct Inner {
    state: Mutex<QueueState>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, timer) in state.timers.drain() {
            timer.abort();
        }
    }
}

/// Ordered list of messages that remove themselves after `lifetime`.
pub struct NotificationQueue {
    inner: Arc<Inner>,
    lifetime: Duration,
}

impl NotificationQueue {
    pub fn new(lifetime: Duration) -> Self {
        NotificationQueue {
            inner: Arc::new(Inner {
                state: Mutex::new(QueueState::default()),
            }),
            lifetime,
        }
    }

    /// Adds a message and schedules its removal.
    ///
    /// Outside a tokio runtime nothing can be scheduled; the message then
    /// stays until dismissed.
    pub fn notify(&self, text: impl Into<String>, kind: NotificationKind) -> MessageId {
        let text = text.into();
        let mut state = self.inner.lock();

        let id = MessageId(Utc::now().timestamp_millis().max(state.last_id + 1));
        state.last_id = id.0;
        debug!(id = %id, ?kind, text = %text, "Notification added");
        state.messages.push(Notification { id, text, kind });

        match Handle::try_current() {
            Ok(runtime) => {
                let timer = runtime.spawn(expire(Arc::downgrade(&self.inner), id, self.lifetime));
                state.timers.insert(id, timer);
            }
            Err(_) => warn!(id = %id, "No runtime; notification will not expire"),
        }

        id
    }

    pub fn success(&self, text: impl Into<String>) -> MessageId {
        self.notify(text, NotificationKind::Success)
    }

    pub fn error(&self, text: impl Into<String>) -> MessageId {
        self.notify(text, NotificationKind::Error)
    }

    /// Removes message `id` and cancels its expiry. Returns whether it was
    /// still present.
    pub fn dismiss(&self, id: MessageId) -> bool {
        let mut state = self.inner.lock();

        if let Some(timer) = state.timers.remove(&id) {
            timer.abort();
        }

        let before = state.messages.len();
        state.messages.retain(|m| m.id != id);
        before != state.messages.len()
    }

    /// Current messages, oldest first.
    pub fn messages(&self) -> Vec<Notification> {
        self.inner.lock().messages.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(MESSAGE_LIFETIME_MS))
    }
}

async fn expire(inner: Weak<Inner>, id: MessageId, lifetime: Duration) {
    tokio::time::sleep(lifetime).await;

    if let Some(inner) = inner.upgrade() {
        let mut state = inner.lock();
        state.timers.remove(&id);
        state.messages.retain(|m| m.id != id);
        debug!(id = %id, "Notification expired");
    }
}
