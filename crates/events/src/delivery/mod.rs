//! External transports for envelopes leaving the process.

pub mod webhook;
