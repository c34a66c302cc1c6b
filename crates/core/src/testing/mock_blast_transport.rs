//! Mock BLAST transport for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::blast::{BlastTransport, Rid, TransportError};

/// A recorded poll request for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedPoll {
    /// The RID that was polled.
    pub rid: Rid,
    /// When the poll was made (tokio clock, so paused-time tests can use it).
    pub at: Instant,
}

type Scripted = VecDeque<Result<String, TransportError>>;

/// Mock implementation of the BlastTransport trait.
///
/// Responses are scripted per command and consumed in order. When the poll
/// script is empty the default poll response is used, if set. An empty
/// submit script, or an empty poll script without a default, yields
/// `TransportError::ConnectionFailed`.
pub struct MockBlastTransport {
    submit_responses: Arc<RwLock<Scripted>>,
    poll_responses: Arc<RwLock<Scripted>>,
    default_poll_response: Arc<RwLock<Option<String>>>,
    submissions: Arc<RwLock<Vec<String>>>,
    polls: Arc<RwLock<Vec<RecordedPoll>>>,
}

impl std::fmt::Debug for MockBlastTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBlastTransport")
            .field("submit_responses", &"<scripted>")
            .field("poll_responses", &"<scripted>")
            .field("submissions", &"<recorded>")
            .field("polls", &"<recorded>")
            .finish()
    }
}

impl Default for MockBlastTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBlastTransport {
    /// Create a mock with nothing scripted.
    pub fn new() -> Self {
        Self {
            submit_responses: Arc::new(RwLock::new(VecDeque::new())),
            poll_responses: Arc::new(RwLock::new(VecDeque::new())),
            default_poll_response: Arc::new(RwLock::new(None)),
            submissions: Arc::new(RwLock::new(Vec::new())),
            polls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    // =========================================================================
    // Scripting
    // =========================================================================

    /// Queue a body for the next `CMD=Put`.
    pub async fn push_submit_response(&self, body: impl Into<String>) {
        self.submit_responses
            .write()
            .await
            .push_back(Ok(body.into()));
    }

    /// Queue a failure for the next `CMD=Put`.
    pub async fn push_submit_error(&self, error: TransportError) {
        self.submit_responses.write().await.push_back(Err(error));
    }

    /// Queue a body for the next `CMD=Get`.
    pub async fn push_poll_response(&self, body: impl Into<String>) {
        self.poll_responses.write().await.push_back(Ok(body.into()));
    }

    /// Queue a failure for the next `CMD=Get`.
    pub async fn push_poll_error(&self, error: TransportError) {
        self.poll_responses.write().await.push_back(Err(error));
    }

    /// Body returned by `CMD=Get` once the poll script is used up.
    pub async fn set_default_poll_response(&self, body: impl Into<String>) {
        *self.default_poll_response.write().await = Some(body.into());
    }

    // =========================================================================
    // Assertions
    // =========================================================================

    /// Sequences submitted so far.
    pub async fn submissions(&self) -> Vec<String> {
        self.submissions.read().await.clone()
    }

    /// Poll requests made so far.
    pub async fn polls(&self) -> Vec<RecordedPoll> {
        self.polls.read().await.clone()
    }

    /// Number of poll requests made so far.
    pub async fn poll_count(&self) -> usize {
        self.polls.read().await.len()
    }

    /// Total number of upstream calls (submits and polls).
    pub async fn call_count(&self) -> usize {
        self.submissions.read().await.len() + self.polls.read().await.len()
    }
}

#[async_trait]
impl BlastTransport for MockBlastTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn submit(&self, sequence: &str) -> Result<String, TransportError> {
        self.submissions.write().await.push(sequence.to_string());

        self.submit_responses
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::ConnectionFailed(
                    "no scripted submit response".to_string(),
                ))
            })
    }

    async fn fetch_result(&self, rid: &Rid) -> Result<String, TransportError> {
        self.polls.write().await.push(RecordedPoll {
            rid: rid.clone(),
            at: Instant::now(),
        });

        if let Some(scripted) = self.poll_responses.write().await.pop_front() {
            return scripted;
        }

        match self.default_poll_response.read().await.as_ref() {
            Some(body) => Ok(body.clone()),
            None => Err(TransportError::ConnectionFailed(
                "no scripted poll response".to_string(),
            )),
        }
    }
}
