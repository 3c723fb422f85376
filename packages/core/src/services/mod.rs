//! Services
//!
//! The outbound half of the server: the authenticated Fastidious API client
//! and its error types. The client holds no shared mutable state - every call
//! is parameterized by the session's `ApiConfig`, making it safely reentrant
//! across concurrent sessions.

pub mod client;
pub mod error;

pub use client::{ApiConfig, FastidiousClient};
pub use error::FastidiousError;
