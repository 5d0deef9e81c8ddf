//! Request extractors shared by handlers.
//!
//! - [`bearer::BearerHeader`] -- the raw `Authorization` header, if any.

pub mod bearer;
