//! Relay Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::binding::BindingError;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error("Forwarding failed: {0}")]
    Forward(#[source] reqwest::Error),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            Self::Binding(e) => e.into_response(),
            Self::Forward(e) => {
                tracing::warn!(error = %e, timeout = e.is_timeout(), "Event forwarding failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({
                        "error": "forward_failed",
                        "message": "Downstream endpoint could not be reached",
                    })),
                )
                    .into_response()
            }
        }
    }
}
