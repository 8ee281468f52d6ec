//! Event Ingestion
//!
//! Receives binary-mode CloudEvents and optionally re-posts them downstream.

use axum::{extract::State, http::StatusCode, Json};
use cloudevents::AttributesReader;
use serde::Serialize;
use tracing::info;

use super::{AppState, RelayError};
use crate::binding::{self, CloudEventRequest};

/// Acknowledgement returned for an accepted event.
#[derive(Debug, Serialize)]
pub struct EventAccepted {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub source: String,
    #[serde(rename = "specversion")]
    pub spec_version: String,
    /// Downstream status code, when the event was forwarded.
    pub forwarded: Option<u16>,
}

/// Accept a CloudEvent.
///
/// POST /events
pub async fn receive_event(
    State(state): State<AppState>,
    CloudEventRequest(event): CloudEventRequest,
) -> Result<(StatusCode, Json<EventAccepted>), RelayError> {
    info!(
        id = event.id(),
        event_type = event.ty(),
        source = %event.source(),
        extensions = event.iter_extensions().count(),
        "Received CloudEvent"
    );

    let forwarded = match state.config.forward_url.as_deref() {
        Some(url) => {
            let pending = binding::create_post_cloud_event(&state.http_client, url, &event)?;
            let response = pending.await.map_err(RelayError::Forward)?;
            info!(
                id = event.id(),
                status = response.status().as_u16(),
                "Forwarded CloudEvent"
            );
            Some(response.status().as_u16())
        }
        None => None,
    };

    Ok((
        StatusCode::ACCEPTED,
        Json(EventAccepted {
            id: event.id().to_string(),
            event_type: event.ty().to_string(),
            source: event.source().to_string(),
            spec_version: event.specversion().to_string(),
            forwarded,
        }),
    ))
}
