//! Common test utilities for E2E testing with a mock BLAST transport.
//!
//! The fixture builds the real router around a `MockBlastTransport` and a
//! temporary static directory, so requests run in-process without network
//! access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use blastrelay_core::{
    testing::MockBlastTransport, BlastConfig, Config, ServerConfig, StaticFilesConfig,
};
use blastrelay_server::state::AppState;

/// Re-export fixtures for test convenience
pub use blastrelay_core::testing::fixtures;

pub const INDEX_HTML: &str = "<!DOCTYPE html><html><body><form id=\"blast\"></form></body></html>";
pub const RESULTS_HTML: &str = "<!DOCTYPE html><html><body><pre id=\"results\"></pre></body></html>";
pub const FAVICON: &[u8] = &[0, 0, 1, 0, 1, 0, 16, 16];

/// Test fixture for E2E testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_submission() {
///     let fixture = TestFixture::new().await;
///     fixture.transport.push_submit_response(fixtures::put_response("ABC")).await;
///     fixture.transport.push_poll_response(fixtures::report_text()).await;
///
///     let response = fixture.post("/", json!({ "sequence": "ACGT" })).await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock transport - script BLAST responses and inspect calls
    pub transport: Arc<MockBlastTransport>,
    /// Temporary directory holding the static pages
    pub static_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

impl TestFixture {
    /// Create a fixture that polls without delay.
    pub async fn new() -> Self {
        Self::with_blast_config(BlastConfig {
            poll_interval_secs: 0,
            ..Default::default()
        })
        .await
    }

    /// Create a fixture with custom BLAST settings.
    pub async fn with_blast_config(blast: BlastConfig) -> Self {
        let static_dir = TempDir::new().expect("Failed to create static dir");
        std::fs::write(static_dir.path().join("index.html"), INDEX_HTML)
            .expect("Failed to write index.html");
        std::fs::write(static_dir.path().join("results.html"), RESULTS_HTML)
            .expect("Failed to write results.html");
        std::fs::write(static_dir.path().join("favicon.ico"), FAVICON)
            .expect("Failed to write favicon.ico");

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            blast,
            static_files: StaticFilesConfig {
                dir: static_dir.path().to_path_buf(),
            },
        };

        let transport = Arc::new(MockBlastTransport::new());
        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&transport) as Arc<dyn blastrelay_core::BlastTransport>,
        ));
        let router = blastrelay_server::api::create_router(state);

        Self {
            router,
            transport,
            static_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.post_with_content_type(path, &body.to_string(), "application/json")
            .await
    }

    /// Send a POST request with a raw body and content type.
    pub async fn post_with_content_type(
        &self,
        path: &str,
        body: &str,
        content_type: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        TestResponse {
            status,
            content_type,
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.body
        );
    };
}
