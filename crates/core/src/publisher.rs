//! Event publisher: wraps caller payloads and hands them to a message sink.
//!
//! Delivery is fire-and-forget. [`EventPublisher::publish`] spawns the send
//! on the tokio runtime and returns the caller's payload straight away, so a
//! slow or failing transport is never observed by the HTTP caller. Send
//! failures are logged and dropped.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::envelope::EventEnvelope;
use crate::error::SinkError;

/// Outbound message channel for envelopes.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Deliver one envelope. Ownership of the envelope moves to the sink.
    async fn send(&self, envelope: EventEnvelope) -> Result<(), SinkError>;
}

/// Publishes caller payloads to a [`MessageSink`].
#[derive(Clone)]
pub struct EventPublisher {
    sink: Arc<dyn MessageSink>,
}

impl EventPublisher {
    pub fn new(sink: Arc<dyn MessageSink>) -> Self {
        Self { sink }
    }

    /// Envelope `payload` with `bearer_token`, submit it, and return `payload`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn publish(&self, payload: Value, bearer_token: Option<String>) -> Value {
        let envelope = EventEnvelope::new(bearer_token, payload.clone());
        let has_token = envelope.has_token();
        let sink = Arc::clone(&self.sink);

        tokio::spawn(async move {
            if let Err(e) = sink.send(envelope).await {
                tracing::warn!(error = %e, has_token, "Envelope delivery failed, dropping");
            }
        });

        payload
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
