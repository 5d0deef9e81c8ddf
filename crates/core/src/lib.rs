//! Secure-chain domain core.
//!
//! Owns the two request flows of the gateway and the seams they depend on:
//!
//! - [`gateway`] -- authenticate a credential pair and issue a token.
//! - [`publisher`] -- wrap a payload in an [`envelope`] and hand it to a
//!   [`MessageSink`](publisher::MessageSink).
//! - [`identity`] -- verified identities and the collaborator traits.
//! - [`error`] -- errors reported by collaborators.

pub mod envelope;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod publisher;
