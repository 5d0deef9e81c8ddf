//! Authentication gateway: credential pair in, signed token out.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{LookupError, VerifyError};
use crate::identity::{CredentialVerifier, IdentityLookup, TokenIssuer};

/// User-facing message for rejected credentials. Never varies with the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect username or password";

/// Request body for `POST /authenticate`.
#[derive(Clone, Deserialize)]
pub struct CredentialRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for CredentialRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response body for a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
}

/// Why an authentication attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The verifier rejected the pair. The display text is safe to show callers.
    #[error("Incorrect username or password")]
    InvalidCredentials {
        #[source]
        source: VerifyError,
    },

    /// Credentials verified but the identity record could not be found.
    #[error("Identity not found for verified user '{0}'")]
    IdentityNotFound(String),

    #[error("Identity lookup failed: {0}")]
    LookupFailed(String),

    #[error("Credential verifier unavailable: {0}")]
    VerifierUnavailable(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),
}

impl From<VerifyError> for AuthError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::InvalidCredentials(_) => AuthError::InvalidCredentials { source: err },
            VerifyError::Unavailable(msg) => AuthError::VerifierUnavailable(msg),
        }
    }
}

impl From<LookupError> for AuthError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(username) => AuthError::IdentityNotFound(username),
            LookupError::Backend(msg) => AuthError::LookupFailed(msg),
        }
    }
}

/// Composes the three authentication collaborators.
///
/// Stateless apart from the shared collaborator handles, so one instance
/// serves all concurrent requests.
#[derive(Clone)]
pub struct AuthGateway {
    verifier: Arc<dyn CredentialVerifier>,
    lookup: Arc<dyn IdentityLookup>,
    issuer: Arc<dyn TokenIssuer>,
}

impl AuthGateway {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        lookup: Arc<dyn IdentityLookup>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            verifier,
            lookup,
            issuer,
        }
    }

    /// Verify the pair, load the identity, and issue a token for it.
    ///
    /// The lookup and the issuer are only consulted after the verifier has
    /// accepted the credentials.
    pub async fn authenticate(&self, request: &CredentialRequest) -> Result<IssuedToken, AuthError> {
        self.verifier
            .verify(&request.username, &request.password)
            .await
            .map_err(|e| {
                tracing::info!(username = %request.username, error = %e, "Authentication rejected");
                AuthError::from(e)
            })?;

        let identity = self.lookup.by_username(&request.username).await?;

        let token = self
            .issuer
            .issue(&identity)
            .map_err(|e| AuthError::TokenIssuance(e.0))?;

        tracing::info!(username = %identity.username, "Issued token");
        Ok(IssuedToken { token })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::error::IssueError;
    use crate::identity::Identity;

    struct FixedVerifier;

    #[async_trait]
    impl CredentialVerifier for FixedVerifier {
        async fn verify(&self, username: &str, password: &str) -> Result<Identity, VerifyError> {
            match (username, password) {
                ("alice", "correct") => Ok(Identity::new("alice", vec![])),
                ("broken", _) => Err(VerifyError::Unavailable("hash corrupt".into())),
                _ => Err(VerifyError::InvalidCredentials(username.to_string())),
            }
        }
    }

    #[derive(Default)]
    struct CountingLookup {
        calls: AtomicUsize,
        missing: bool,
    }

    #[async_trait]
    impl IdentityLookup for CountingLookup {
        async fn by_username(&self, username: &str) -> Result<Identity, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.missing {
                return Err(LookupError::NotFound(username.to_string()));
            }
            Ok(Identity::new(username, vec!["publisher".into()]))
        }
    }

    #[derive(Default)]
    struct CountingIssuer {
        calls: AtomicUsize,
    }

    impl TokenIssuer for CountingIssuer {
        fn issue(&self, identity: &Identity) -> Result<String, IssueError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("token-for-{}-{}", identity.username, identity.roles.join(",")))
        }
    }

    struct FailingIssuer;

    impl TokenIssuer for FailingIssuer {
        fn issue(&self, _identity: &Identity) -> Result<String, IssueError> {
            Err(IssueError("signing key rejected".into()))
        }
    }

    fn request(username: &str, password: &str) -> CredentialRequest {
        CredentialRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn gateway(
        lookup: Arc<CountingLookup>,
        issuer: Arc<CountingIssuer>,
    ) -> AuthGateway {
        AuthGateway::new(Arc::new(FixedVerifier), lookup, issuer)
    }

    #[tokio::test]
    async fn accepted_credentials_issue_one_token_for_looked_up_identity() {
        let lookup = Arc::new(CountingLookup::default());
        let issuer = Arc::new(CountingIssuer::default());
        let gw = gateway(Arc::clone(&lookup), Arc::clone(&issuer));

        let issued = gw.authenticate(&request("alice", "correct")).await.unwrap();

        // Roles come from the lookup, not the verifier.
        assert_eq!(issued.token, "token-for-alice-publisher");
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
        assert_eq!(issuer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejected_credentials_skip_lookup_and_issuer() {
        let lookup = Arc::new(CountingLookup::default());
        let issuer = Arc::new(CountingIssuer::default());
        let gw = gateway(Arc::clone(&lookup), Arc::clone(&issuer));

        let err = gw.authenticate(&request("alice", "wrong")).await.unwrap_err();

        assert_matches!(err, AuthError::InvalidCredentials { .. });
        assert_eq!(err.to_string(), INVALID_CREDENTIALS_MESSAGE);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
        assert_eq!(issuer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_credentials_keep_verifier_error_as_source() {
        let gw = gateway(Arc::default(), Arc::default());
        let err = gw.authenticate(&request("mallory", "x")).await.unwrap_err();

        let source = std::error::Error::source(&err).expect("cause must be chained");
        assert_eq!(source.to_string(), "Bad credentials for user 'mallory'");
    }

    #[tokio::test]
    async fn verifier_outage_is_not_reported_as_bad_credentials() {
        let gw = gateway(Arc::default(), Arc::default());
        let err = gw.authenticate(&request("broken", "x")).await.unwrap_err();
        assert_matches!(err, AuthError::VerifierUnavailable(msg) if msg == "hash corrupt");
    }

    #[tokio::test]
    async fn missing_identity_after_verification_is_classified() {
        let lookup = Arc::new(CountingLookup {
            calls: AtomicUsize::new(0),
            missing: true,
        });
        let issuer = Arc::new(CountingIssuer::default());
        let gw = gateway(lookup, Arc::clone(&issuer));

        let err = gw.authenticate(&request("alice", "correct")).await.unwrap_err();

        assert_matches!(err, AuthError::IdentityNotFound(name) if name == "alice");
        assert_eq!(issuer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn issuer_failure_surfaces_as_token_issuance() {
        let gw = AuthGateway::new(
            Arc::new(FixedVerifier),
            Arc::new(CountingLookup::default()),
            Arc::new(FailingIssuer),
        );
        let err = gw.authenticate(&request("alice", "correct")).await.unwrap_err();
        assert_matches!(err, AuthError::TokenIssuance(_));
    }

    #[test]
    fn debug_output_redacts_password() {
        let rendered = format!("{:?}", request("alice", "hunter2"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }
}
