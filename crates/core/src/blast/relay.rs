//! Submit-then-poll pipeline.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::metrics::RELAY_DURATION;

use super::{BlastTransport, JobSubmitter, PollError, PollPolicy, ResultPoller, SubmitError};

/// Terminal failure of a relay run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Poll(#[from] PollError),
}

impl RelayError {
    /// Label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Submit(SubmitError::NoTicketFound) => "no_ticket",
            RelayError::Submit(SubmitError::Transport(_)) => "submit_transport_error",
            RelayError::Poll(PollError::Transport(_)) => "poll_transport_error",
            RelayError::Poll(PollError::Exhausted { .. }) => "poll_exhausted",
        }
    }
}

/// Submits a sequence and waits for its BLAST report.
///
/// Holds no per-request state, so one instance is shared by all requests.
pub struct SequenceRelay {
    submitter: JobSubmitter,
    poller: ResultPoller,
}

impl SequenceRelay {
    pub fn new(transport: Arc<dyn BlastTransport>, policy: PollPolicy) -> Self {
        Self {
            submitter: JobSubmitter::new(Arc::clone(&transport)),
            poller: ResultPoller::new(transport, policy),
        }
    }

    pub fn policy(&self) -> &PollPolicy {
        self.poller.policy()
    }

    /// Run one submission to completion. `sequence` must be non-empty.
    pub async fn run(&self, sequence: &str) -> Result<String, RelayError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("relay", %request_id);

        async {
            let start = Instant::now();
            let result = self.submit_and_poll(sequence).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(body) => {
                    RELAY_DURATION
                        .with_label_values(&["ok"])
                        .observe(elapsed.as_secs_f64());
                    info!(body_len = body.len(), elapsed_ms = elapsed.as_millis() as u64, "Relay finished");
                }
                Err(e) => {
                    RELAY_DURATION
                        .with_label_values(&[e.kind()])
                        .observe(elapsed.as_secs_f64());
                    warn!(error = %e, kind = e.kind(), "Relay failed");
                }
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn submit_and_poll(&self, sequence: &str) -> Result<String, RelayError> {
        let rid = self.submitter.submit(sequence).await?;
        let body = self
            .poller
            .poll(&rid)
            .instrument(info_span!("poll", rid = %rid))
            .await?;
        Ok(body)
    }
}
