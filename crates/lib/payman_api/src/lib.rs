//! # payman_api
//!
//! HTTP API library for Payman Relay.

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use payman_core::{HttpConnector, PaymanConnector};
use tower_http::cors::CorsLayer;

use crate::config::ApiConfig;
use crate::handlers::{ask, health};

/// Route paths served by [`router`].
pub mod routes {
    pub const POST_PAYMAN_ASK: &str = "/payman/ask";
    pub const GET_HEALTH: &str = "/health";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration, fixed at startup.
    pub config: Arc<ApiConfig>,
    /// Upstream Payman connector.
    pub connector: Arc<dyn PaymanConnector>,
}

impl AppState {
    /// State backed by the real Payman service at `config.base_url()`.
    pub fn new(config: ApiConfig) -> Self {
        let connector = HttpConnector::new(config.base_url());
        Self::with_connector(config, Arc::new(connector))
    }

    pub fn with_connector(config: ApiConfig, connector: Arc<dyn PaymanConnector>) -> Self {
        Self {
            config: Arc::new(config),
            connector,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    // Any origin, mirrored so that credentialed requests are accepted.
    let cors = CorsLayer::very_permissive();

    Router::new()
        .route(routes::POST_PAYMAN_ASK, post(ask::ask_handler))
        .route(routes::GET_HEALTH, get(health::health_handler))
        .layer(cors)
        .with_state(state)
}
