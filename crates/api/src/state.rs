use std::sync::Arc;

use securechain_core::gateway::AuthGateway;
use securechain_core::publisher::{EventPublisher, MessageSink};

use crate::auth::jwt::JwtTokenIssuer;
use crate::auth::users::UserDirectory;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Collaborators are
/// assembled explicitly at startup and passed in here.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Credential check and token issuance for `/authenticate`.
    pub gateway: AuthGateway,
    /// Envelope submission for `/publish`.
    pub publisher: EventPublisher,
}

impl AppState {
    /// Wire the user directory, a JWT issuer built from `config`, and `sink`.
    pub fn new(config: ServerConfig, directory: UserDirectory, sink: Arc<dyn MessageSink>) -> Self {
        let directory = Arc::new(directory);
        let issuer = Arc::new(JwtTokenIssuer::new(config.jwt.clone()));
        let gateway = AuthGateway::new(directory.clone(), directory, issuer);

        Self {
            config: Arc::new(config),
            gateway,
            publisher: EventPublisher::new(sink),
        }
    }
}
