//! Attribute Codecs
//!
//! Text forms of the context attributes that travel in headers.

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use cloudevents::event::SpecVersion;
use url::{ParseError, Url};

use super::BindingError;

/// Context attribute names an extension may not shadow.
pub const RESERVED_ATTRIBUTE_NAMES: &[&str] = &[
    "id",
    "source",
    "specversion",
    "type",
    "datacontenttype",
    "dataschema",
    "subject",
    "time",
    "data",
];

/// Base used only to validate relative references.
static VALIDATION_BASE: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("http://uri-reference.invalid/").expect("static base URL is valid")
});

/// Parse a spec version from its wire form (`"0.3"` or `"1.0"`).
pub fn parse_spec_version(value: &str) -> Result<SpecVersion, BindingError> {
    SpecVersion::try_from(value).map_err(|_| BindingError::UnknownSpecVersion(value.to_string()))
}

/// Parse an RFC 3339 offset date-time (e.g. `2024-05-01T12:30:00+02:00`).
pub fn parse_time(value: &str) -> Result<DateTime<Utc>, BindingError> {
    DateTime::parse_from_rfc3339(value)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|source| BindingError::MalformedTimestamp {
            value: value.to_string(),
            source,
        })
}

/// Format a time as RFC 3339 with `Z` and only the fractional digits needed.
pub fn write_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Validate a `source` as a URI-reference: an absolute URI or a relative
/// reference. The text is returned unchanged.
pub fn parse_source(value: &str) -> Result<String, BindingError> {
    let checked = match Url::parse(value) {
        Ok(_) => Ok(()),
        Err(ParseError::RelativeUrlWithoutBase) => VALIDATION_BASE.join(value).map(|_| ()),
        Err(e) => Err(e),
    };

    checked
        .map(|()| value.to_string())
        .map_err(|e| BindingError::MalformedUri {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Extension names are non-empty lowercase ASCII letters and digits, and do
/// not shadow a context attribute.
pub fn is_valid_extension_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        && !RESERVED_ATTRIBUTE_NAMES.contains(&name)
}
