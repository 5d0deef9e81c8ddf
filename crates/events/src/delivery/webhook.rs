//! Webhook transport with exponential-backoff retry.
//!
//! [`WebhookSink`] POSTs each JSON-encoded [`EventEnvelope`] to a configured
//! URL. Failed attempts are retried with backoff (1 s, 2 s, 4 s by default)
//! before the last error is returned to the caller.

use std::time::Duration;

use async_trait::async_trait;
use securechain_core::envelope::EventEnvelope;
use securechain_core::error::SinkError;
use securechain_core::publisher::MessageSink;

/// Default retry delays in seconds (exponential backoff: 1s, 2s, 4s).
const DEFAULT_RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers envelopes to an external HTTP endpoint.
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
    retry_delays: Vec<Duration>,
}

impl WebhookSink {
    /// Build a sink targeting `url` with the default retry schedule.
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
            retry_delays: DEFAULT_RETRY_DELAYS_SECS
                .iter()
                .map(|s| Duration::from_secs(*s))
                .collect(),
        })
    }

    /// Replace the backoff schedule. One attempt is made per delay, plus a
    /// final attempt after the last delay.
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, envelope: &EventEnvelope) -> Result<(), SinkError> {
        let response = self
            .client
            .post(&self.url)
            .json(envelope)
            .send()
            .await
            .map_err(|e| SinkError::TransportUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SinkError::Rejected(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl MessageSink for WebhookSink {
    async fn send(&self, envelope: EventEnvelope) -> Result<(), SinkError> {
        for (attempt, delay) in self.retry_delays.iter().enumerate() {
            match self.try_send(&envelope).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        url = %self.url,
                        error = %e,
                        "Webhook delivery attempt failed, retrying"
                    );
                    tokio::time::sleep(*delay).await;
                }
            }
        }

        // Final attempt after the last backoff.
        self.try_send(&envelope).await.inspect_err(|e| {
            tracing::error!(url = %self.url, error = %e, "Webhook delivery failed after all retries");
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
