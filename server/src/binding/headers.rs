//! Header Names and Lookups

use http::header::{HeaderMap, HeaderName, HeaderValue};

use super::BindingError;

pub const CE_ID: &str = "Ce-Id";
pub const CE_TYPE: &str = "Ce-Type";
pub const CE_SOURCE: &str = "Ce-Source";
pub const CE_SPECVERSION: &str = "Ce-Specversion";
pub const CE_TIME: &str = "Ce-Time";
pub const CE_SUBJECT: &str = "Ce-Subject";

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Headers that must be present on an inbound request, with the attribute
/// each one carries.
pub const REQUIRED_HEADERS: [(&str, &str); 3] =
    [(CE_ID, "id"), (CE_SOURCE, "source"), (CE_TYPE, "type")];

/// A header value as UTF-8 text.
///
/// Matches what the outbound side writes: any UTF-8 string without control
/// characters, not only visible ASCII.
pub fn header_text(value: &HeaderValue) -> Option<&str> {
    std::str::from_utf8(value.as_bytes()).ok()
}

/// First value of `name` as text, if the header is present.
pub fn first_value<'a>(
    headers: &'a HeaderMap,
    name: &str,
) -> Result<Option<&'a str>, BindingError> {
    headers
        .get(name)
        .map(|value| {
            header_text(value).ok_or_else(|| BindingError::InvalidHeaderValue {
                name: name.to_string(),
            })
        })
        .transpose()
}

/// Name of one of the fixed headers above.
pub(crate) fn fixed_header_name(name: &'static str) -> HeaderName {
    HeaderName::from_bytes(name.as_bytes()).expect("fixed header names are valid")
}

pub fn header_value(name: &str, value: &str) -> Result<HeaderValue, BindingError> {
    HeaderValue::from_str(value).map_err(|_| BindingError::InvalidHeaderValue {
        name: name.to_string(),
    })
}
