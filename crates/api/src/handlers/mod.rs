//! Request handlers.
//!
//! Handlers stay thin: they extract the request, delegate to the
//! [`AuthGateway`](securechain_core::gateway::AuthGateway) or the
//! [`EventPublisher`](securechain_core::publisher::EventPublisher) held in
//! [`AppState`](crate::state::AppState), and map errors via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod hello;
pub mod publish;
