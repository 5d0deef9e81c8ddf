//! Startup assembly: turns a [`ServerConfig`] into a ready [`AppState`].

use std::sync::Arc;

use securechain_core::publisher::MessageSink;
use securechain_events::{EnvelopeLogger, EventBus, LoggerStats, WebhookSink};
use tokio::task::JoinHandle;

use crate::auth::users::{DirectoryError, UserDirectory};
use crate::config::{ConfigError, ServerConfig};
use crate::state::AppState;

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Failed to build webhook client: {0}")]
    Sink(String),
}

/// The outbound channel selected at startup, kept for shutdown.
pub enum Transport {
    /// In-process bus drained by an [`EnvelopeLogger`] task.
    Bus {
        bus: Arc<EventBus>,
        logger: JoinHandle<LoggerStats>,
    },
    Webhook { url: String },
}

/// Everything `main` needs to serve and later shut down.
pub struct Assembled {
    pub state: AppState,
    pub transport: Transport,
}

/// Load the user directory, pick the message sink, and build the state.
///
/// Must be called from within a tokio runtime (the bus logger is spawned).
pub fn assemble(config: ServerConfig) -> Result<Assembled, StartupError> {
    let directory = match &config.users_file {
        Some(path) => {
            let directory = UserDirectory::from_file(path)?;
            tracing::info!(path = %path.display(), users = directory.len(), "Loaded user directory");
            directory
        }
        None => {
            tracing::warn!("AUTH_USERS_FILE not set, every authentication will be rejected");
            UserDirectory::empty()?
        }
    };

    let (sink, transport): (Arc<dyn MessageSink>, Transport) = match &config.webhook_url {
        Some(url) => {
            let sink: Arc<dyn MessageSink> = Arc::new(
                WebhookSink::new(url.clone()).map_err(|e| StartupError::Sink(e.to_string()))?,
            );
            tracing::info!(url = %url, "Publishing envelopes to webhook");
            (sink, Transport::Webhook { url: url.clone() })
        }
        None => {
            let bus = Arc::new(EventBus::default());
            let logger = tokio::spawn(EnvelopeLogger::run(bus.subscribe()));
            tracing::info!("Publishing envelopes to in-process bus");
            let sink: Arc<dyn MessageSink> = bus.clone();
            (sink, Transport::Bus { bus, logger })
        }
    };

    Ok(Assembled {
        state: AppState::new(config, directory, sink),
        transport,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(extra: &[(&str, &str)]) -> ServerConfig {
        let mut vars: HashMap<&str, &str> = HashMap::from([("JWT_SECRET", "s3cret")]);
        vars.extend(extra.iter().copied());
        ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap()
    }

    #[tokio::test]
    async fn defaults_to_bus_with_logger() {
        let assembled = assemble(config(&[])).unwrap();
        match assembled.transport {
            Transport::Bus { bus, logger } => {
                assert_eq!(bus.subscriber_count(), 1);
                // The state still holds a bus handle; drop both to close it.
                drop(assembled.state);
                drop(bus);
                let stats = logger.await.unwrap();
                assert_eq!(stats.received, 0);
            }
            Transport::Webhook { .. } => panic!("expected bus transport"),
        }
    }

    #[tokio::test]
    async fn webhook_url_selects_webhook() {
        let assembled = assemble(config(&[("SINK_WEBHOOK_URL", "http://127.0.0.1:9/hook")])).unwrap();
        assert!(matches!(
            assembled.transport,
            Transport::Webhook { ref url } if url == "http://127.0.0.1:9/hook"
        ));
    }

    #[tokio::test]
    async fn missing_users_file_aborts_startup() {
        let err = assemble(config(&[("AUTH_USERS_FILE", "/nonexistent/users.json")]))
            .err()
            .unwrap();
        assert!(matches!(err, StartupError::Directory(DirectoryError::Io { .. })));
    }
}
