//! Reference implementations of the authentication collaborators.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT generation and validation; [`jwt::JwtTokenIssuer`].
//! - [`users`] -- [`users::UserDirectory`], the credential verifier and identity lookup.

pub mod jwt;
pub mod password;
pub mod users;
