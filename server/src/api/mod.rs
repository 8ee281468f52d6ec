//! API Router and Application State
//!
//! Central routing configuration and shared state.

mod error;
pub mod events;

use axum::{
    extract::{DefaultBodyLimit, FromRef, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::binding::ExtensionNames;
use crate::config::Config;

pub use error::RelayError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// HTTP client used to forward events
    pub http_client: reqwest::Client,
    /// Extension headers kept on received events
    pub extension_names: ExtensionNames,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(config: Config, http_client: reqwest::Client) -> Self {
        let extension_names = ExtensionNames::new(config.forward_extensions.iter().cloned());
        Self {
            config: Arc::new(config),
            http_client,
            extension_names,
        }
    }
}

impl FromRef<AppState> for ExtensionNames {
    fn from_ref(state: &AppState) -> Self {
        state.extension_names.clone()
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.max_body_size;

    Router::new()
        .route("/health", get(health_check))
        .route("/events", post(events::receive_event))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    forwarding: bool,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        forwarding: state.config.has_forwarding(),
    })
}
