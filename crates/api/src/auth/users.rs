//! In-memory user directory loaded from a JSON file.
//!
//! [`UserDirectory`] backs both the [`CredentialVerifier`] and the
//! [`IdentityLookup`] seams. The file holds an array of records:
//!
//! ```json
//! [{"username": "alice", "password_hash": "$argon2id$v=19$...", "roles": ["publisher"]}]
//! ```
//!
//! Password hashes are Argon2id PHC strings produced by
//! [`hash_password`](super::password::hash_password) and checked through a
//! [`PasswordChecker`] owned by the directory.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use securechain_core::error::{LookupError, VerifyError};
use securechain_core::identity::{CredentialVerifier, Identity, IdentityLookup};
use serde::Deserialize;

use super::password::PasswordChecker;

/// Errors raised while loading the directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Failed to read user file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed user file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate user '{0}' in user file")]
    DuplicateUser(String),

    #[error("Failed to prepare password hasher: {0}")]
    Hasher(String),
}

/// One entry of the user file.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Read-only map of users keyed by username.
#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<HashMap<String, UserRecord>>,
    checker: PasswordChecker,
}

impl UserDirectory {
    /// Build a directory from records, rejecting duplicate usernames.
    pub fn new(records: Vec<UserRecord>) -> Result<Self, DirectoryError> {
        let mut users = HashMap::with_capacity(records.len());
        for record in records {
            if users.contains_key(&record.username) {
                return Err(DirectoryError::DuplicateUser(record.username));
            }
            users.insert(record.username.clone(), record);
        }

        let checker = PasswordChecker::new().map_err(|e| DirectoryError::Hasher(e.to_string()))?;

        Ok(Self {
            users: Arc::new(users),
            checker,
        })
    }

    pub fn empty() -> Result<Self, DirectoryError> {
        Self::new(Vec::new())
    }

    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let records: Vec<UserRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    pub fn from_file(path: &Path) -> Result<Self, DirectoryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn identity_of(record: &UserRecord) -> Identity {
        Identity::new(record.username.clone(), record.roles.clone())
    }
}

#[async_trait]
impl CredentialVerifier for UserDirectory {
    async fn verify(&self, username: &str, password: &str) -> Result<Identity, VerifyError> {
        let record = self.users.get(username);
        let matched = self
            .checker
            .check(username, password, record.map(|r| r.password_hash.as_str()))
            .await?;

        match record {
            Some(record) if matched => Ok(Self::identity_of(record)),
            _ => Err(VerifyError::InvalidCredentials(username.to_string())),
        }
    }
}

#[async_trait]
impl IdentityLookup for UserDirectory {
    async fn by_username(&self, username: &str) -> Result<Identity, LookupError> {
        self.users
            .get(username)
            .map(Self::identity_of)
            .ok_or_else(|| LookupError::NotFound(username.to_string()))
    }
}
