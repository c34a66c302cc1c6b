//! End-to-end tests with a mocked BLAST service.
//!
//! These tests run the full router in-process with `MockBlastTransport`
//! standing in for NCBI.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use blastrelay_core::{BlastConfig, OnExhausted, TransportError, WAITING_MARKER};

use common::{fixtures, TestFixture, INDEX_HTML, RESULTS_HTML};

// =============================================================================
// Basic API Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/health").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
}

#[tokio::test]
async fn test_config_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/v1/config").await;
    assert_status!(response, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["blast"]["database"], "core_nt");
    assert_eq!(body["blast"]["program"], "blastn");
    assert_eq!(body["blast"]["max_attempts"], 10);
    assert_eq!(body["blast"]["on_exhausted"], "return_last_body");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/metrics").await;
    assert_status!(response, StatusCode::OK);
    assert!(response.body.contains("blastrelay_http_requests_in_flight"));
    assert!(response.body.contains("blastrelay_poll_attempts_total"));
}

// =============================================================================
// Submission Tests
// =============================================================================

#[tokio::test]
async fn test_waiting_then_report_returns_report() {
    let fixture = TestFixture::new().await;
    fixture
        .transport
        .push_submit_response(fixtures::put_response("ABC123-X"))
        .await;
    fixture
        .transport
        .push_poll_response(fixtures::waiting_response())
        .await;
    fixture
        .transport
        .push_poll_response(fixtures::waiting_response())
        .await;
    fixture
        .transport
        .push_poll_response(fixtures::report_text())
        .await;

    let response = fixture
        .post("/", json!({ "sequence": "ACGTTGCAACGTTGCA" }))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, fixtures::report_text());
    assert!(response
        .content_type
        .as_deref()
        .unwrap()
        .starts_with("text/plain"));

    assert_eq!(
        fixture.transport.submissions().await,
        vec!["ACGTTGCAACGTTGCA"]
    );
    let polls = fixture.transport.polls().await;
    assert_eq!(polls.len(), 3);
    assert!(polls.iter().all(|p| p.rid.as_str() == "ABC123-X"));
}

#[tokio::test]
async fn test_empty_sequence_is_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture.post("/", json!({ "sequence": "" })).await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "No sequence provided.");
    assert_eq!(fixture.transport.call_count().await, 0);
}

#[tokio::test]
async fn test_missing_sequence_is_rejected() {
    let fixture = TestFixture::new().await;

    for body in [json!({}), json!({ "sequence": null })] {
        let response = fixture.post("/", body).await;
        assert_status!(response, StatusCode::BAD_REQUEST);
        assert_eq!(response.body, "No sequence provided.");
    }
    assert_eq!(fixture.transport.call_count().await, 0);
}

#[tokio::test]
async fn test_unreadable_body_is_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_with_content_type("/", "{not json", "application/json")
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "No sequence provided.");

    let response = fixture
        .post_with_content_type("/", "sequence=ACGT", "application/x-www-form-urlencoded")
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    assert_eq!(fixture.transport.call_count().await, 0);
}

#[tokio::test]
async fn test_missing_rid_returns_500() {
    let fixture = TestFixture::new().await;
    fixture
        .transport
        .push_submit_response(fixtures::put_response_without_rid())
        .await;

    let response = fixture.post("/", json!({ "sequence": "ACGT" })).await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, "Failed to get RID from BLAST.");
    assert_eq!(fixture.transport.poll_count().await, 0);
}

#[tokio::test]
async fn test_all_polls_waiting_returns_last_body() {
    let fixture = TestFixture::new().await;
    fixture
        .transport
        .push_submit_response(fixtures::put_response("ABC123-X"))
        .await;
    for attempt in 1..=10 {
        fixture
            .transport
            .push_poll_response(format!("{}poll #{}", fixtures::waiting_response(), attempt))
            .await;
    }

    let response = fixture.post("/", json!({ "sequence": "ACGT" })).await;

    assert_status!(response, StatusCode::OK);
    assert!(response.body.contains(WAITING_MARKER));
    assert!(response.body.ends_with("poll #10"));
    assert_eq!(fixture.transport.poll_count().await, 10);
}

#[tokio::test]
async fn test_submit_transport_error_returns_500() {
    let fixture = TestFixture::new().await;
    fixture
        .transport
        .push_submit_error(TransportError::ConnectionFailed("refused".to_string()))
        .await;

    let response = fixture.post("/", json!({ "sequence": "ACGT" })).await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, "Error fetching BLAST results.");
    assert_eq!(fixture.transport.poll_count().await, 0);
}

#[tokio::test]
async fn test_poll_transport_error_returns_500() {
    let fixture = TestFixture::new().await;
    fixture
        .transport
        .push_submit_response(fixtures::put_response("ABC123-X"))
        .await;
    fixture
        .transport
        .push_poll_response(fixtures::waiting_response())
        .await;
    fixture
        .transport
        .push_poll_error(TransportError::Timeout)
        .await;
    fixture
        .transport
        .set_default_poll_response(fixtures::report_text())
        .await;

    let response = fixture.post("/", json!({ "sequence": "ACGT" })).await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, "Error fetching BLAST results.");
    assert_eq!(fixture.transport.poll_count().await, 2);
}

#[tokio::test]
async fn test_strict_exhaustion_returns_504() {
    let fixture = TestFixture::with_blast_config(BlastConfig {
        poll_interval_secs: 0,
        max_attempts: 2,
        on_exhausted: OnExhausted::Fail,
        ..Default::default()
    })
    .await;
    fixture
        .transport
        .push_submit_response(fixtures::put_response("ABC123-X"))
        .await;
    fixture
        .transport
        .set_default_poll_response(fixtures::waiting_response())
        .await;

    let response = fixture.post("/", json!({ "sequence": "ACGT" })).await;

    assert_status!(response, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(response.body, "BLAST results not ready.");
    assert_eq!(fixture.transport.poll_count().await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_default_interval_between_polls() {
    let fixture = TestFixture::with_blast_config(BlastConfig::default()).await;
    fixture
        .transport
        .push_submit_response(fixtures::put_response("ABC123-X"))
        .await;
    fixture
        .transport
        .push_poll_response(fixtures::waiting_response())
        .await;
    fixture
        .transport
        .push_poll_response(fixtures::report_text())
        .await;

    let start = tokio::time::Instant::now();
    let response = fixture.post("/", json!({ "sequence": "ACGT" })).await;

    assert_status!(response, StatusCode::OK);
    let polls = fixture.transport.polls().await;
    assert_eq!(polls.len(), 2);
    assert!(polls[0].at - start >= Duration::from_secs(5));
    assert!(polls[1].at - polls[0].at >= Duration::from_secs(5));
}

#[tokio::test]
async fn test_repeat_submissions_are_independent() {
    let fixture = TestFixture::new().await;
    fixture
        .transport
        .push_submit_response(fixtures::put_response("FIRSTRID"))
        .await;
    fixture
        .transport
        .push_submit_response(fixtures::put_response("SECONDRID"))
        .await;
    fixture
        .transport
        .set_default_poll_response(fixtures::report_text())
        .await;

    for _ in 0..2 {
        let response = fixture.post("/", json!({ "sequence": "ACGT" })).await;
        assert_status!(response, StatusCode::OK);
    }

    let polls = fixture.transport.polls().await;
    assert_eq!(polls.len(), 2);
    assert_eq!(polls[0].rid.as_str(), "FIRSTRID");
    assert_eq!(polls[1].rid.as_str(), "SECONDRID");
}

// =============================================================================
// Static Page Tests
// =============================================================================

#[tokio::test]
async fn test_root_serves_index() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, INDEX_HTML);
    assert!(response.content_type.unwrap().starts_with("text/html"));
}

#[tokio::test]
async fn test_results_page() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/results.html").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, RESULTS_HTML);
}

#[tokio::test]
async fn test_favicon() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/favicon.ico").await;
    assert_status!(response, StatusCode::OK);
    assert!(!response.body.is_empty());
}

#[tokio::test]
async fn test_unknown_path_falls_back_to_index() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/does/not/exist").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, INDEX_HTML);
}
