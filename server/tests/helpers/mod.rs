//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestServer` for running a router on a real TCP listener, a
//! capturing `Sink` that records every request posted to it, and helpers for
//! driving the relay router through `tower::ServiceExt::oneshot`.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Request, Response, StatusCode};
use axum::routing::post;
use axum::Router;
use ce_server::api::{create_router, AppState};
use ce_server::config::Config;
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tower::ServiceExt;

// ============================================================================
// Test servers
// ============================================================================

/// A router served on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub url: String,
    _handle: JoinHandle<()>,
}

/// Spawn `router` on `127.0.0.1:0`.
///
/// ```ignore
/// let server = spawn_test_server(router).await;
/// let resp = reqwest::Client::new().get(format!("{}/health", server.url)).send().await?;
/// ```
pub async fn spawn_test_server(router: Router) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let url = format!("http://{addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    TestServer {
        addr,
        url,
        _handle: handle,
    }
}

// ============================================================================
// Capturing sink
// ============================================================================

/// A request received by a [`Sink`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub body: String,
}

/// Downstream endpoint that records every POST to `/sink` and answers with
/// a fixed status.
#[derive(Clone)]
pub struct Sink {
    received: Arc<Mutex<Vec<CapturedRequest>>>,
    status: StatusCode,
}

impl Sink {
    pub fn new(status: StatusCode) -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            status,
        }
    }

    /// Spawn the sink and return its server together with the `/sink` URL.
    pub async fn spawn(&self) -> (TestServer, String) {
        let router = Router::new()
            .route("/sink", post(capture))
            .with_state(self.clone());
        let server = spawn_test_server(router).await;
        let url = format!("{}/sink", server.url);
        (server, url)
    }

    pub async fn received(&self) -> Vec<CapturedRequest> {
        self.received.lock().await.clone()
    }
}

async fn capture(State(sink): State<Sink>, headers: HeaderMap, body: Bytes) -> StatusCode {
    sink.received.lock().await.push(CapturedRequest {
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });
    sink.status
}

// ============================================================================
// Relay helpers
// ============================================================================

/// Build the relay router for `config`.
pub fn relay_router(config: Config) -> Router {
    let client = config.http_client().expect("Failed to build HTTP client");
    create_router(AppState::new(config, client))
}

/// Send a single request through `router` without a listener.
pub async fn oneshot(router: Router, request: Request<Body>) -> Response<Body> {
    router.oneshot(request).await.expect("Router call failed")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

/// Header value as text, if present.
pub fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
