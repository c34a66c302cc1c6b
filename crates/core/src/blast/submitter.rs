//! Job submission: `CMD=Put` and RID extraction.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;
use tracing::{info, warn};

use crate::metrics::SUBMISSIONS;

use super::{BlastTransport, Rid, TransportError};

static RID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"RID = ([A-Z0-9-]+)").unwrap());

/// Errors from the submission step. Both are terminal for the request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The Put response had no `RID = ...` line. Either the body was malformed
    /// or BLAST rejected the query; the two are not told apart.
    #[error("No RID found in BLAST submission response")]
    NoTicketFound,

    #[error("Submission failed: {0}")]
    Transport(#[from] TransportError),
}

/// Extract the request id from a Put response body.
pub fn extract_rid(body: &str) -> Option<Rid> {
    RID_PATTERN
        .captures(body)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Rid::parse(m.as_str()))
}

/// Submits sequences and hands back the RID.
///
/// Submissions are never retried here: BLAST may already have registered the
/// job, so a second Put would start a duplicate search.
pub struct JobSubmitter {
    transport: Arc<dyn BlastTransport>,
}

impl JobSubmitter {
    pub fn new(transport: Arc<dyn BlastTransport>) -> Self {
        Self { transport }
    }

    /// Submit a non-empty sequence.
    pub async fn submit(&self, sequence: &str) -> Result<Rid, SubmitError> {
        let body = match self.transport.submit(sequence).await {
            Ok(body) => body,
            Err(e) => {
                warn!(transport = self.transport.name(), error = %e, "BLAST submission failed");
                SUBMISSIONS.with_label_values(&["transport_error"]).inc();
                return Err(SubmitError::Transport(e));
            }
        };

        match extract_rid(&body) {
            Some(rid) => {
                info!(rid = %rid, "BLAST job submitted");
                SUBMISSIONS.with_label_values(&["ok"]).inc();
                Ok(rid)
            }
            None => {
                warn!(body_len = body.len(), "No RID in BLAST submission response");
                SUBMISSIONS.with_label_values(&["no_ticket"]).inc();
                Err(SubmitError::NoTicketFound)
            }
        }
    }
}
