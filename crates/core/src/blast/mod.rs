//! Submit-and-poll adapter for the NCBI BLAST URL API.
//!
//! BLAST searches are asynchronous: a `CMD=Put` request registers the query
//! and answers with a request id (RID), then `CMD=Get` requests report either
//! `Status=WAITING` or the finished report. This module turns that pair into a
//! single call with a bounded number of polls.
//!
//! - [`JobSubmitter`] issues the Put and extracts the [`Rid`].
//! - [`ResultPoller`] polls the RID until the waiting marker disappears or the
//!   attempt budget runs out.
//! - [`SequenceRelay`] chains the two.
//!
//! All network access goes through the [`BlastTransport`] trait so the
//! adapter can be driven by [`NcbiBlastClient`] in production and by
//! `testing::MockBlastTransport` in tests.

mod ncbi;
mod poller;
mod relay;
mod submitter;
mod types;

pub use ncbi::NcbiBlastClient;
pub use poller::{PollError, PollPolicy, ResultPoller};
pub use relay::{RelayError, SequenceRelay};
pub use submitter::{extract_rid, JobSubmitter, SubmitError};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Network-level failures talking to the BLAST service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Could not connect to the service.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Response body could not be read as text.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Request could not be built or sent.
    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::ConnectionFailed(e.to_string())
        } else if e.is_body() || e.is_decode() {
            TransportError::Body(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

/// Raw access to the two BLAST URL API commands.
///
/// Implementations return the full response body as text and never interpret
/// it; RID extraction and status checks live in the submitter and poller.
#[async_trait]
pub trait BlastTransport: Send + Sync {
    /// Name of the transport (for logging).
    fn name(&self) -> &str;

    /// Issue `CMD=Put` for the given sequence.
    async fn submit(&self, sequence: &str) -> Result<String, TransportError>;

    /// Issue `CMD=Get` for the given request id.
    async fn fetch_result(&self, rid: &Rid) -> Result<String, TransportError>;
}
