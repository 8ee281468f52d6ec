//! Outbound Mapping
//!
//! Turns an `Event` into a POST request: attributes as `Ce-*` headers,
//! extensions as headers named after their keys, data as the body.

use std::future::Future;

use chrono::Utc;
use cloudevents::event::Data;
use cloudevents::{AttributesReader, Event};
use http::header::{HeaderMap, HeaderName};
use tracing::debug;

use super::attributes::{is_valid_extension_name, write_time};
use super::headers::{
    fixed_header_name, header_value, APPLICATION_JSON, CE_ID, CE_SOURCE, CE_SPECVERSION,
    CE_SUBJECT, CE_TIME, CE_TYPE, CONTENT_TYPE,
};
use super::BindingError;

/// Request body for `event`: its data as text.
///
/// Binary data is read as UTF-8 with invalid sequences replaced, so binary
/// payloads do not survive the trip. An event without data yields an empty
/// body.
pub fn to_body(event: &Event) -> String {
    match event.data() {
        Some(Data::Binary(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
        Some(Data::String(text)) => text.clone(),
        Some(Data::Json(value)) => value.to_string(),
        None => String::new(),
    }
}

/// Headers for `event`.
///
/// `Content-Type` is always `application/json`, whatever the event's own
/// `datacontenttype` says. `Ce-Time` falls back to the current time.
pub fn to_headers(event: &Event) -> Result<HeaderMap, BindingError> {
    let mut headers = HeaderMap::new();

    append(&mut headers, CONTENT_TYPE, APPLICATION_JSON)?;
    let time = event.time().copied().unwrap_or_else(Utc::now);
    append(&mut headers, CE_TIME, &write_time(&time))?;

    append(&mut headers, CE_ID, event.id())?;
    append(&mut headers, CE_SPECVERSION, &event.specversion().to_string())?;
    append(&mut headers, CE_TYPE, event.ty())?;
    if let Some(subject) = event.subject() {
        append(&mut headers, CE_SUBJECT, subject)?;
    }
    append(&mut headers, CE_SOURCE, event.source().as_str())?;

    for (name, value) in event.iter_extensions() {
        if !is_valid_extension_name(name) {
            return Err(BindingError::InvalidExtensionName {
                name: name.to_string(),
            });
        }
        let header = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            BindingError::InvalidExtensionName {
                name: name.to_string(),
            }
        })?;
        headers.append(header, header_value(name, &value.to_string())?);
    }

    Ok(headers)
}

fn append(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<(), BindingError> {
    headers.append(fixed_header_name(name), header_value(name, value)?);
    Ok(())
}

/// Build a POST of `event` to `uri` on `client`.
///
/// Mapping failures are returned immediately. The returned future sends the
/// request only when polled; its error is the client's own, unchanged.
pub fn create_post_cloud_event(
    client: &reqwest::Client,
    uri: &str,
    event: &Event,
) -> Result<impl Future<Output = reqwest::Result<reqwest::Response>>, BindingError> {
    let headers = to_headers(event)?;
    debug!(
        id = event.id(),
        event_type = event.ty(),
        uri,
        "Posting CloudEvent"
    );
    Ok(client.post(uri).headers(headers).body(to_body(event)).send())
}
