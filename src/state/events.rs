//! Transport-agnostic broadcast hub. Every successful mutation publishes one
//! event here; SSE streams and WebSocket connections subscribe the same way.

use serde::Serialize;
use tokio::sync::broadcast;

/// Dispatched payload carried to every realtime subscriber.
#[derive(Clone, Debug)]
pub struct ServerEvent {
    /// Event name, e.g. `nfc:poisoned`.
    pub name: String,
    /// JSON payload describing the minimal delta for UI refresh.
    pub payload: serde_json::Value,
}

impl ServerEvent {
    /// Convenience wrapper that serialises `payload` into the event body.
    pub fn json<T: Serialize>(name: &str, payload: &T) -> serde_json::Result<Self> {
        Ok(Self {
            name: name.to_string(),
            payload: serde_json::to_value(payload)?,
        })
    }
}

/// Broadcast hub fanning events out to all realtime subscribers.
pub struct EventHub {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventHub {
    /// Construct a new hub backed by a Tokio broadcast channel with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new subscriber that will receive subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    /// Send an event to all current subscribers, ignoring delivery errors.
    pub fn broadcast(&self, event: ServerEvent) {
        let _ = self.sender.send(event);
    }
}
