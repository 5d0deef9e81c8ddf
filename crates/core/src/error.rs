//! Error types reported by the gateway's external collaborators.
//!
//! Each collaborator trait in [`crate::identity`] and [`crate::publisher`]
//! returns one of these. The handlers classify them into [`AuthError`]
//! (authentication path) or log them (publish path).
//!
//! [`AuthError`]: crate::gateway::AuthError

/// Failure reported by a [`CredentialVerifier`](crate::identity::CredentialVerifier).
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The username/password pair was rejected.
    #[error("Bad credentials for user '{0}'")]
    InvalidCredentials(String),

    /// The verifier could not reach a decision (corrupt hash, backend down).
    #[error("Credential verifier unavailable: {0}")]
    Unavailable(String),
}

/// Failure reported by an [`IdentityLookup`](crate::identity::IdentityLookup).
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("No identity registered for user '{0}'")]
    NotFound(String),

    #[error("Identity lookup failed: {0}")]
    Backend(String),
}

/// Failure reported by a [`TokenIssuer`](crate::identity::TokenIssuer).
#[derive(Debug, thiserror::Error)]
#[error("Token issuance failed: {0}")]
pub struct IssueError(pub String);

/// Failure reported by a [`MessageSink`](crate::publisher::MessageSink).
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The in-process bus had no subscribers, so the envelope was dropped.
    #[error("No subscribers attached to the message channel")]
    NoSubscribers,

    /// The transport could not be reached (network, DNS, timeout).
    #[error("Transport unavailable: {0}")]
    TransportUnavailable(String),

    /// The transport answered but refused the envelope.
    #[error("Transport rejected envelope with HTTP {0}")]
    Rejected(u16),
}
