//! Axum Extractor
//!
//! `CloudEventRequest` parses the handler's request into an `Event`.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequest, Request};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use cloudevents::Event;

use super::inbound::{extensions_from_headers, parse_from_request_with_extension};

/// Extension attributes the extractor recovers from request headers.
#[derive(Debug, Clone, Default)]
pub struct ExtensionNames(pub Arc<[String]>);

impl ExtensionNames {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self(names.into_iter().collect())
    }
}

/// An `Event` read from a binary-mode HTTP request.
///
/// An empty body is treated as no body. Headers named by the state's
/// [`ExtensionNames`] become extension attributes. Mapping failures reject
/// with `400 Bad Request`.
#[derive(Debug, Clone)]
pub struct CloudEventRequest(pub Event);

impl<S> FromRequest<S> for CloudEventRequest
where
    S: Send + Sync,
    ExtensionNames: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let names = ExtensionNames::from_ref(state);
        let headers = req.headers().clone();
        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let text = (!body.is_empty()).then(|| String::from_utf8_lossy(&body).into_owned());
        let extensions = extensions_from_headers(&headers, names.0.iter());
        parse_from_request_with_extension(&headers, text.as_deref(), Some(&extensions))
            .map(Self)
            .map_err(IntoResponse::into_response)
    }
}
