//! Result polling: repeated `CMD=Get` until the waiting marker disappears.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::{BlastConfig, OnExhausted};
use crate::metrics::{POLL_ATTEMPTS, POLL_EXHAUSTED, POLL_OUTCOMES};

use super::{BlastTransport, PollOutcome, Rid, TransportError};

/// Errors from the polling step.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollError {
    /// A poll request failed. No further attempts are made.
    #[error("Polling failed: {0}")]
    Transport(#[from] TransportError),

    /// Every attempt still reported the job as waiting. Only produced with
    /// [`OnExhausted::Fail`].
    #[error("BLAST results not ready after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Timing and budget for one poll sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay before every request, including the first.
    pub interval: Duration,
    /// Maximum number of Get requests.
    pub max_attempts: u32,
    pub on_exhausted: OnExhausted,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 10,
            on_exhausted: OnExhausted::ReturnLastBody,
        }
    }
}

impl From<&BlastConfig> for PollPolicy {
    fn from(config: &BlastConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.poll_interval_secs),
            max_attempts: config.max_attempts,
            on_exhausted: config.on_exhausted,
        }
    }
}

/// Polls a RID until BLAST reports something other than `Status=WAITING`.
///
/// The loop is strictly sequential: sleep, request, classify. It ends on the
/// first non-waiting body, on the first transport error, or when the attempt
/// budget runs out.
pub struct ResultPoller {
    transport: Arc<dyn BlastTransport>,
    policy: PollPolicy,
}

impl ResultPoller {
    pub fn new(transport: Arc<dyn BlastTransport>, policy: PollPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Poll until done. Returns the final body untouched.
    pub async fn poll(&self, rid: &Rid) -> Result<String, PollError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_body = String::new();

        for attempt in 1..=max_attempts {
            sleep(self.policy.interval).await;

            let outcome = self.poll_once(rid).await;
            POLL_OUTCOMES.with_label_values(&[outcome.label()]).inc();

            match outcome {
                PollOutcome::Ready(body) => {
                    info!(rid = %rid, attempt, body_len = body.len(), "BLAST results ready");
                    debug!(rid = %rid, "BLAST result:\n{}", body);
                    return Ok(body);
                }
                PollOutcome::StillWaiting(body) => {
                    info!(rid = %rid, attempt, max_attempts, "Results not ready yet, retrying");
                    last_body = body;
                }
                PollOutcome::TransportError(e) => {
                    error!(rid = %rid, attempt, error = %e, "BLAST poll request failed");
                    return Err(PollError::Transport(e));
                }
            }
        }

        POLL_EXHAUSTED.inc();
        match self.policy.on_exhausted {
            OnExhausted::ReturnLastBody => {
                warn!(
                    rid = %rid,
                    attempts = max_attempts,
                    "BLAST still waiting after all attempts, returning last response"
                );
                Ok(last_body)
            }
            OnExhausted::Fail => {
                warn!(rid = %rid, attempts = max_attempts, "BLAST still waiting after all attempts");
                Err(PollError::Exhausted {
                    attempts: max_attempts,
                })
            }
        }
    }

    /// Issue one Get request and classify the body.
    async fn poll_once(&self, rid: &Rid) -> PollOutcome {
        POLL_ATTEMPTS.inc();
        match self.transport.fetch_result(rid).await {
            Ok(body) => PollOutcome::from_body(body),
            Err(e) => PollOutcome::TransportError(e),
        }
    }
}
