//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] fans [`DripEvent`]s out to every subscriber. It is shared via
//! `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use drippress_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A reader marked a post completed.
pub const EVENT_PROGRESS_COMPLETED: &str = "progress.completed";

/// An administrator set or replaced a post's drip delay.
pub const EVENT_DRIP_SETTING_UPDATED: &str = "drip_setting.updated";

/// An administrator removed a post's drip delay.
pub const EVENT_DRIP_SETTING_REMOVED: &str = "drip_setting.removed";

/// The plugin was deactivated.
pub const EVENT_PLUGIN_DEACTIVATED: &str = "plugin.deactivated";

// ---------------------------------------------------------------------------
// DripEvent
// ---------------------------------------------------------------------------

/// Something that happened to drip content or reader progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DripEvent {
    /// Dot-separated event name, e.g. `"progress.completed"`.
    pub event_type: String,

    /// Optional source entity kind (e.g. `"post"`).
    pub source_entity_type: Option<String>,

    pub source_entity_id: Option<DbId>,

    /// Optional id of the user that triggered the event.
    pub actor_user_id: Option<DbId>,

    /// Event-specific JSON payload.
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl DripEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Completion of `post_id` recorded for `user_id`.
    pub fn progress_completed(post_id: DbId, user_id: DbId) -> Self {
        Self::new(EVENT_PROGRESS_COMPLETED)
            .with_source("post", post_id)
            .with_payload(serde_json::json!({ "post_id": post_id, "user_id": user_id }))
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// ```rust
/// use drippress_events::bus::{DripEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(DripEvent::progress_completed(42, 7));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<DripEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest messages are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. Dropped silently when
    /// nobody is listening.
    pub fn publish(&self, event: DripEvent) {
        tracing::debug!(event_type = %event.event_type, "Publishing event");
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DripEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
