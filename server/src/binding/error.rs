//! Binding Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cloudevents::event::EventBuilderError;
use serde_json::json;

/// Errors raised while mapping between HTTP and a CloudEvent.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("Required attribute '{0}' is not present")]
    MissingRequiredField(&'static str),

    #[error("Unknown spec version: {0}")]
    UnknownSpecVersion(String),

    #[error("Malformed timestamp '{value}': {source}")]
    MalformedTimestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Malformed URI '{value}': {reason}")]
    MalformedUri { value: String, reason: String },

    #[error("Header '{name}' does not carry a valid text value")]
    InvalidHeaderValue { name: String },

    /// Extension names become header names, so they must be lowercase
    /// alphanumerics that cannot collide with a `Ce-*` header.
    #[error("Invalid extension name: {name}")]
    InvalidExtensionName { name: String },

    #[error("Invalid event: {0}")]
    Event(#[from] EventBuilderError),
}

impl BindingError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField(_) => "missing_required_field",
            Self::UnknownSpecVersion(_) => "unknown_spec_version",
            Self::MalformedTimestamp { .. } => "malformed_timestamp",
            Self::MalformedUri { .. } => "malformed_uri",
            Self::InvalidHeaderValue { .. } => "invalid_header_value",
            Self::InvalidExtensionName { .. } => "invalid_extension_name",
            Self::Event(_) => "invalid_event",
        }
    }
}

impl IntoResponse for BindingError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, code = self.code(), "Rejected CloudEvent request");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.code(), "message": self.to_string() })),
        )
            .into_response()
    }
}
