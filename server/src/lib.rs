//! CloudEvents HTTP Server
//!
//! Binary-mode CloudEvents binding for HTTP: parses `Ce-*` headers into
//! envelopes, posts envelopes as `Ce-*` headers, and a small relay service
//! built on both.

pub mod api;
pub mod binding;
pub mod config;
