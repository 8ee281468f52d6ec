//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

use crate::binding::attributes::is_valid_extension_name;

/// Relay configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Downstream URL that received events are re-posted to (optional)
    pub forward_url: Option<String>,

    /// Timeout for forwarded requests in seconds (default: 10)
    pub forward_timeout_secs: u64,

    /// Maximum accepted event body size in bytes (default: 1MB)
    pub max_body_size: usize,

    /// Extension headers read from incoming requests and kept on the event
    /// (comma-separated, e.g. "traceparent,tracestate")
    pub forward_extensions: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let forward_url = env::var("FORWARD_URL")
            .ok()
            .filter(|u| !u.trim().is_empty());
        if let Some(url) = &forward_url {
            reqwest::Url::parse(url)
                .with_context(|| format!("FORWARD_URL is not a valid URL: {url}"))?;
        }

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            forward_url,
            forward_timeout_secs: env::var("FORWARD_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            max_body_size: env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            forward_extensions: parse_extension_list(
                &env::var("FORWARD_EXTENSIONS").unwrap_or_default(),
            )?,
        })
    }

    /// Check if forwarding is configured.
    #[must_use]
    pub const fn has_forwarding(&self) -> bool {
        self.forward_url.is_some()
    }

    /// Build the HTTP client used for forwarding.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.forward_timeout_secs))
            .user_agent(concat!("ce-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")
    }

    /// Create a default configuration for testing (no forwarding).
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:0".into(),
            forward_url: None,
            forward_timeout_secs: 5,
            max_body_size: 64 * 1024,
            forward_extensions: Vec::new(),
        }
    }
}

/// Split a comma-separated list of extension names, ignoring blanks.
fn parse_extension_list(raw: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !is_valid_extension_name(name) {
            bail!("FORWARD_EXTENSIONS contains an invalid extension name: {name}");
        }
        names.push(name.to_string());
    }
    Ok(names)
}
