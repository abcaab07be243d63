//! # payman_core
//!
//! Client library for the Payman conversational payment service.
//!
//! # Public API
//!
//! - [`PaymanConfig`] — per-call credentials and optional session id
//! - [`Environment`] — which Payman deployment to talk to
//! - [`PaymanClient`] — one configured client, exposes [`PaymanClient::ask`]
//! - [`PaymanConnector`] — the seam the HTTP layer calls through
//! - [`PaymanError`] — upstream, transport and configuration failures

pub mod client;
pub mod config;
pub mod connector;
pub mod error;

pub use client::PaymanClient;
pub use config::{Environment, PaymanConfig};
pub use connector::{HttpConnector, PaymanConnector};
pub use error::PaymanError;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
