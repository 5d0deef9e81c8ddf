//! Verified identities and the collaborator traits that produce them.
//!
//! The authentication gateway never stores credentials or signs tokens
//! itself. It is composed from three trait objects supplied at startup:
//!
//! - [`CredentialVerifier`] -- accepts or rejects a username/password pair.
//! - [`IdentityLookup`] -- loads the full identity record for a username.
//! - [`TokenIssuer`] -- signs a token scoped to an identity.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{IssueError, LookupError, VerifyError};

/// A user whose credentials have been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub username: String,
    /// Role names granted to the user (e.g. `"publisher"`).
    pub roles: Vec<String>,
}

impl Identity {
    pub fn new(username: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }
}

/// Checks a username/password pair.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Return the verified identity, or [`VerifyError::InvalidCredentials`]
    /// when the pair is rejected.
    async fn verify(&self, username: &str, password: &str) -> Result<Identity, VerifyError>;
}

/// Loads identity records by username.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn by_username(&self, username: &str) -> Result<Identity, LookupError>;
}

/// Produces signed, opaque tokens for an identity.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, identity: &Identity) -> Result<String, IssueError>;
}
