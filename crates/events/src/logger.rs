//! Background subscriber that records every envelope crossing the bus.
//!
//! [`EnvelopeLogger`] is the terminal consumer attached to the in-process
//! [`EventBus`](crate::bus::EventBus) when no external transport is
//! configured. It runs as a long-lived task and shuts down when the bus
//! sender is dropped.

use securechain_core::envelope::EventEnvelope;
use tokio::sync::broadcast;

/// Counters reported when the logger exits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoggerStats {
    pub received: u64,
    pub skipped: u64,
}

/// Background service that logs delivered envelopes.
pub struct EnvelopeLogger;

impl EnvelopeLogger {
    /// Run the logging loop until the channel closes.
    pub async fn run(mut receiver: broadcast::Receiver<EventEnvelope>) -> LoggerStats {
        let mut stats = LoggerStats::default();
        loop {
            match receiver.recv().await {
                Ok(envelope) => {
                    stats.received += 1;
                    Self::record(&envelope);
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    stats.skipped += n;
                    tracing::warn!(skipped = n, "Envelope logger lagged, some envelopes were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(
                        received = stats.received,
                        skipped = stats.skipped,
                        "Event bus closed, envelope logger shutting down"
                    );
                    break;
                }
            }
        }
        stats
    }

    fn record(envelope: &EventEnvelope) {
        // Never log the bearer value itself.
        let payload_bytes = serde_json::to_vec(&envelope.payload)
            .map(|b| b.len())
            .unwrap_or(0);
        tracing::info!(
            has_token = envelope.has_token(),
            payload_bytes,
            "Envelope delivered"
        );
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::bus::EventBus;

    #[tokio::test]
    async fn exits_when_bus_dropped_and_reports_counts() {
        let bus = EventBus::default();
        let handle = tokio::spawn(EnvelopeLogger::run(bus.subscribe()));

        bus.broadcast(EventEnvelope::new(None, json!({"id": 1}))).unwrap();
        bus.broadcast(EventEnvelope::new(Some("Bearer t".into()), json!({"id": 2})))
            .unwrap();
        drop(bus);

        let stats = handle.await.expect("logger task should not panic");
        assert_eq!(
            stats,
            LoggerStats {
                received: 2,
                skipped: 0
            }
        );
    }

    #[tokio::test]
    async fn counts_envelopes_lost_to_lag() {
        let bus = EventBus::new(2);
        let receiver = bus.subscribe();

        for i in 0..4 {
            bus.broadcast(EventEnvelope::new(None, json!({"id": i}))).unwrap();
        }
        drop(bus);

        let stats = EnvelopeLogger::run(receiver).await;
        assert_eq!(
            stats,
            LoggerStats {
                received: 2,
                skipped: 2
            }
        );
    }
}
