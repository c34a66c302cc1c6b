//! BLAST submission handler.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{debug, error, warn};

use blastrelay_core::{PollError, RelayError, SubmitError};

use crate::state::AppState;

pub const NO_SEQUENCE_MESSAGE: &str = "No sequence provided.";
pub const NO_RID_MESSAGE: &str = "Failed to get RID from BLAST.";
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching BLAST results.";
pub const NOT_READY_MESSAGE: &str = "BLAST results not ready.";

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SequenceRequest {
    #[serde(default)]
    pub sequence: Option<String>,
}

/// Failures surfaced to the caller as a status code and a fixed message.
#[derive(Debug)]
pub enum SubmissionError {
    /// Sequence missing or empty.
    InvalidInput,
    Relay(RelayError),
}

impl SubmissionError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            SubmissionError::InvalidInput => (StatusCode::BAD_REQUEST, NO_SEQUENCE_MESSAGE),
            SubmissionError::Relay(RelayError::Submit(SubmitError::NoTicketFound)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, NO_RID_MESSAGE)
            }
            SubmissionError::Relay(RelayError::Poll(PollError::Exhausted { .. })) => {
                (StatusCode::GATEWAY_TIMEOUT, NOT_READY_MESSAGE)
            }
            SubmissionError::Relay(_) => (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE),
        }
    }
}

impl From<RelayError> for SubmissionError {
    fn from(e: RelayError) -> Self {
        SubmissionError::Relay(e)
    }
}

impl IntoResponse for SubmissionError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, message).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /
///
/// Submit `{"sequence": "..."}` to BLAST and answer with the raw text report.
pub async fn submit_sequence(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SequenceRequest>, JsonRejection>,
) -> Result<Response, SubmissionError> {
    let sequence = match body {
        Ok(Json(SequenceRequest {
            sequence: Some(sequence),
        })) if !sequence.is_empty() => sequence,
        Ok(_) => {
            debug!("Submission without a sequence");
            return Err(SubmissionError::InvalidInput);
        }
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable submission body");
            return Err(SubmissionError::InvalidInput);
        }
    };

    let report = state.relay().run(&sequence).await.map_err(|e| {
        match &e {
            RelayError::Submit(SubmitError::NoTicketFound) => {
                warn!(error = %e, "BLAST did not return a RID")
            }
            _ => error!(error = %e, "Error fetching BLAST results"),
        }
        SubmissionError::from(e)
    })?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        report,
    )
        .into_response())
}
