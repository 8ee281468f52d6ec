//! CloudEvents HTTP Binding
//!
//! Maps between HTTP headers/body and [`Event`](cloudevents::Event) envelopes
//! in binary content mode: context attributes travel as `Ce-*` headers, the
//! payload travels as the request body.

pub mod attributes;
pub mod error;
pub mod extract;
pub mod headers;
pub mod inbound;
pub mod outbound;

pub use error::BindingError;
pub use extract::{CloudEventRequest, ExtensionNames};
pub use headers::*;
pub use inbound::{
    extensions_from_headers, parse_from_request, parse_from_request_with_extension, Extensions,
};
pub use outbound::{create_post_cloud_event, to_body, to_headers};

/// Apply `apply` to `target` only when `value` is present.
pub(crate) fn apply_present<B, T>(target: B, value: Option<T>, apply: impl FnOnce(B, T) -> B) -> B {
    match value {
        Some(value) => apply(target, value),
        None => target,
    }
}
