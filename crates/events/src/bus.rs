//! In-process envelope bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the default [`MessageSink`]: every published envelope is
//! fanned out to all current subscribers. It is designed to be shared via
//! `Arc<EventBus>` across the application.

use async_trait::async_trait;
use securechain_core::envelope::EventEnvelope;
use securechain_core::error::SinkError;
use securechain_core::publisher::MessageSink;
use tokio::sync::broadcast;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out message channel.
///
/// # Usage
///
/// ```rust
/// use securechain_core::envelope::EventEnvelope;
/// use securechain_events::bus::EventBus;
///
/// let bus = EventBus::default();
/// let _rx = bus.subscribe();
///
/// bus.broadcast(EventEnvelope::new(None, serde_json::json!({"id": 1}))).unwrap();
/// ```
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed envelopes are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Fan `envelope` out to all subscribers, returning how many received it.
    ///
    /// Fails with [`SinkError::NoSubscribers`] when nobody is listening; the
    /// envelope is dropped in that case.
    pub fn broadcast(&self, envelope: EventEnvelope) -> Result<usize, SinkError> {
        self.sender
            .send(envelope)
            .map_err(|_| SinkError::NoSubscribers)
    }

    /// Subscribe to all envelopes published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl MessageSink for EventBus {
    async fn send(&self, envelope: EventEnvelope) -> Result<(), SinkError> {
        self.broadcast(envelope).map(|_| ())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
