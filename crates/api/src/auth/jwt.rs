//! JWT token generation and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload scoped to a
//! verified [`Identity`]. [`JwtTokenIssuer`] exposes generation through the
//! [`TokenIssuer`] seam used by the authentication gateway.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use securechain_core::error::IssueError;
use securechain_core::identity::{Identity, TokenIssuer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{parse_or, ConfigError};

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the authenticated username.
    pub sub: String,
    /// Role names granted to the user.
    pub roles: Vec<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for revocation / audit.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes (default: 600).
    pub expiry_mins: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_mins", &self.expiry_mins)
            .finish()
    }
}

/// Default token expiry in minutes (ten hours).
const DEFAULT_EXPIRY_MINS: i64 = 600;

/// Longest accepted token lifetime in minutes (one year).
pub const MAX_EXPIRY_MINS: i64 = 525_600;

impl JwtConfig {
    /// Load JWT configuration through a variable lookup.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_EXPIRY_MINS` | no       | `600`   |
    ///
    /// `JWT_EXPIRY_MINS` must lie in `1..=MAX_EXPIRY_MINS`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if secret.is_empty() {
            return Err(ConfigError::Invalid {
                var: "JWT_SECRET",
                reason: "must not be empty".into(),
            });
        }

        let expiry_mins: i64 = parse_or(&lookup, "JWT_EXPIRY_MINS", DEFAULT_EXPIRY_MINS)?;
        if !(1..=MAX_EXPIRY_MINS).contains(&expiry_mins) {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY_MINS",
                reason: format!("{expiry_mins} is outside 1..={MAX_EXPIRY_MINS}"),
            });
        }

        Ok(Self {
            secret,
            expiry_mins,
        })
    }
}

/// Generate an HS256 token for the given identity.
///
/// The token contains the username, roles, issue time, expiration, and a
/// unique `jti` claim. Fails rather than wrapping when the expiry does not
/// fit in a Unix timestamp.
pub fn generate_access_token(identity: &Identity, config: &JwtConfig) -> Result<String, IssueError> {
    let now = chrono::Utc::now().timestamp();
    let exp = config
        .expiry_mins
        .checked_mul(60)
        .and_then(|secs| now.checked_add(secs))
        .ok_or_else(|| {
            IssueError(format!(
                "expiry of {} minutes overflows the token timestamp",
                config.expiry_mins
            ))
        })?;

    let claims = Claims {
        sub: identity.username.clone(),
        roles: identity.roles.clone(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| IssueError(e.to_string()))
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// [`TokenIssuer`] backed by [`generate_access_token`].
#[derive(Debug, Clone)]
pub struct JwtTokenIssuer {
    config: JwtConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, identity: &Identity) -> Result<String, IssueError> {
        generate_access_token(identity, &self.config)
    }
}
