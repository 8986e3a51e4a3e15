//! Event system for playctl
//!
//! The controller communicates over two channels:
//! - **EventBus** (tokio::broadcast): one-to-many observation of transitions
//! - **Backend channel** (tokio::mpsc): backend reports → single controller
//!
//! Transitions are applied by exactly one task, so no shared mutable state
//! exists outside the controller itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::state::PlayerState;

/// Observable player events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerEvent {
    /// Playback state changed
    StateChanged {
        old_state: PlayerState,
        new_state: PlayerState,
        timestamp: DateTime<Utc>,
    },

    /// A session acquired a backend handle and began loading
    SessionStarted {
        session_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// A session released its handle
    ///
    /// `completed` is true when the backend reported end-of-resource, false
    /// for an explicit stop.
    SessionEnded {
        session_id: Uuid,
        completed: bool,
        timestamp: DateTime<Utc>,
    },

    /// The status display was rebuilt with new content
    DisplayUpdated {
        body: String,
        timestamp: DateTime<Utc>,
    },

    /// The status display was removed
    DisplayRemoved { timestamp: DateTime<Utc> },
}

/// Central event distribution bus
///
/// Wraps tokio::broadcast, providing:
/// - Non-blocking publish (slow subscribers don't block the controller)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PlayerEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` otherwise.
    pub fn emit(
        &self,
        event: PlayerEvent,
    ) -> std::result::Result<usize, broadcast::error::SendError<PlayerEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: PlayerEvent) {
        let _ = self.tx.send(event);
    }

    /// Current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
