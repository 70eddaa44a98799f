//! schoolmed - session gate and API client for the school health platform
//!
//! This is the library interface for schoolmed: session restore and
//! route gating, the shared HTTP transport, and typed wrappers for the
//! backend endpoints.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod records;

pub use api::ApiClient;
pub use auth::{GuardDecision, Route, SessionStore};
pub use config::Config;
pub use error::Error;
