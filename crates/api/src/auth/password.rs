//! Password checks for the user directory.
//!
//! Stored hashes are Argon2id PHC strings. [`PasswordChecker`] runs every
//! comparison on the blocking pool, and for unknown usernames it compares
//! against a throwaway hash so a rejection costs the same whether or not the
//! user exists.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use securechain_core::error::VerifyError;

/// Secret behind the throwaway hash. Its value never grants access.
const EQUALIZER_SECRET: &str = "securechain-timing-equalizer";

/// Produce a PHC string for the `password_hash` field of a user file.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| phc.to_string())
}

/// `Ok(false)` on mismatch; `Err` only when `stored` is not a usable PHC string.
fn matches_stored(password: &str, stored: &str) -> Result<bool, password_hash::Error> {
    let phc = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &phc) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Compares submitted passwords with stored hashes.
#[derive(Clone)]
pub struct PasswordChecker {
    equalizer: Arc<str>,
}

impl PasswordChecker {
    /// Hashes the equalizer secret once, so this is as slow as one login.
    pub fn new() -> Result<Self, password_hash::Error> {
        Ok(Self {
            equalizer: hash_password(EQUALIZER_SECRET)?.into(),
        })
    }

    /// Check `password` for `username` against `stored`.
    ///
    /// `stored` is `None` for unknown users; the equalizer hash is verified
    /// instead and the answer is always `false`. A stored hash that cannot be
    /// parsed is [`VerifyError::Unavailable`], never a rejection.
    pub async fn check(
        &self,
        username: &str,
        password: &str,
        stored: Option<&str>,
    ) -> Result<bool, VerifyError> {
        let known = stored.is_some();
        let hash: Arc<str> = match stored {
            Some(hash) => hash.into(),
            None => Arc::clone(&self.equalizer),
        };
        let password = password.to_owned();

        // Argon2 is deliberately slow; keep it off the async workers.
        let outcome = tokio::task::spawn_blocking(move || matches_stored(&password, &hash))
            .await
            .map_err(|e| VerifyError::Unavailable(format!("verification task failed: {e}")))?;

        match outcome {
            Ok(matched) => Ok(known && matched),
            Err(e) => {
                tracing::error!(username, error = %e, "Stored password hash is unusable");
                Err(VerifyError::Unavailable(format!(
                    "stored hash for '{username}' is unusable"
                )))
            }
        }
    }
}
