//! Secure-chain message channel implementations.
//!
//! This crate provides the [`MessageSink`](securechain_core::publisher::MessageSink)
//! implementations the publisher can be wired to:
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`EnvelopeLogger`] -- background subscriber that records every envelope
//!   crossing the bus.
//! - [`delivery`] -- external transports (webhook).

pub mod bus;
pub mod delivery;
pub mod logger;

pub use bus::EventBus;
pub use delivery::webhook::WebhookSink;
pub use logger::{EnvelopeLogger, LoggerStats};
