//! Inbound Mapping
//!
//! Builds an `Event` from request headers and an optional body.

use std::collections::BTreeMap;
use std::fmt;

use cloudevents::event::{EventBuilderV03, ExtensionValue, SpecVersion};
use cloudevents::{AttributesReader, Event, EventBuilder, EventBuilderV10};
use http::HeaderMap;
use tracing::debug;

use super::attributes::{is_valid_extension_name, parse_source, parse_spec_version, parse_time};
use super::headers::{
    first_value, header_text, APPLICATION_JSON, CE_ID, CE_SOURCE, CE_SPECVERSION, CE_SUBJECT,
    CE_TIME, CE_TYPE, CONTENT_TYPE, REQUIRED_HEADERS,
};
use super::{apply_present, BindingError};

/// Extension attributes keyed by name.
pub type Extensions = BTreeMap<String, ExtensionValue>;

/// Recover the extensions named in `names` from `headers`.
///
/// Names that are not valid extension names, headers that are absent and
/// values that are not UTF-8 text are skipped. Values are kept as strings.
pub fn extensions_from_headers<I, N>(headers: &HeaderMap, names: I) -> Extensions
where
    I: IntoIterator<Item = N>,
    N: AsRef<str>,
{
    let mut extensions = Extensions::new();
    for name in names {
        let name = name.as_ref();
        if !is_valid_extension_name(name) {
            continue;
        }
        if let Some(text) = headers.get(name).and_then(header_text) {
            extensions.insert(name.to_string(), ExtensionValue::from(text));
        }
    }
    extensions
}

/// Parse an `Event` from request headers and body.
///
/// See [`parse_from_request_with_extension`].
pub fn parse_from_request<B>(headers: &HeaderMap, body: Option<&B>) -> Result<Event, BindingError>
where
    B: fmt::Display + ?Sized,
{
    parse_from_request_with_extension(headers, body, None)
}

/// Parse an `Event` from request headers and body, adding `extension` to the
/// event's extension attributes.
///
/// `Ce-Id`, `Ce-Source` and `Ce-Type` are required and checked before anything
/// is parsed. A missing `Ce-Specversion` defaults to `1.0` and a missing
/// `Content-Type` to `application/json`. The body, when present, becomes
/// string data holding its `Display` form, typed with that content type.
pub fn parse_from_request_with_extension<B>(
    headers: &HeaderMap,
    body: Option<&B>,
    extension: Option<&Extensions>,
) -> Result<Event, BindingError>
where
    B: fmt::Display + ?Sized,
{
    for (name, attribute) in REQUIRED_HEADERS {
        if !headers.contains_key(name) {
            return Err(BindingError::MissingRequiredField(attribute));
        }
    }

    let version = first_value(headers, CE_SPECVERSION)?
        .map(parse_spec_version)
        .transpose()?
        .unwrap_or(SpecVersion::V10);
    let content_type = first_value(headers, CONTENT_TYPE)?.unwrap_or(APPLICATION_JSON);

    let time = first_value(headers, CE_TIME)?.map(parse_time).transpose()?;
    let source = first_value(headers, CE_SOURCE)?
        .map(parse_source)
        .transpose()?;

    let mut builder = EventBuilderV10::new();
    builder = apply_present(builder, first_value(headers, CE_ID)?, |b, id| b.id(id));
    builder = apply_present(builder, first_value(headers, CE_TYPE)?, |b, ty| b.ty(ty));
    builder = apply_present(builder, time, |b, time| b.time(time));
    builder = apply_present(builder, source, |b, source| b.source(source));
    builder = apply_present(builder, body, |b, body| b.data(content_type, body.to_string()));
    builder = apply_present(builder, first_value(headers, CE_SUBJECT)?, |b, subject| {
        b.subject(subject)
    });

    for (name, value) in extension.into_iter().flatten() {
        if !is_valid_extension_name(name) {
            return Err(BindingError::InvalidExtensionName { name: name.clone() });
        }
        builder = builder.extension(name, value.clone());
    }

    let mut event = builder.build()?;
    if version == SpecVersion::V03 {
        event = EventBuilderV03::from(event).build()?;
    }

    debug!(
        id = event.id(),
        event_type = event.ty(),
        source = %event.source(),
        specversion = %event.specversion(),
        "Parsed CloudEvent from request"
    );
    Ok(event)
}
