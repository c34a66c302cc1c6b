//! Values passed between the submitter and the poller.

use std::fmt;

use serde::Serialize;

use super::TransportError;

/// Substring the service puts in a Get response while the search is running.
pub const WAITING_MARKER: &str = "Status=WAITING";

/// BLAST request id, issued by `CMD=Put`.
///
/// Only uppercase ASCII letters, digits and hyphens are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Rid(String);

impl Rid {
    /// Build a RID, returning `None` if `value` is empty or has other characters.
    pub fn parse(value: &str) -> Option<Self> {
        let valid = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-');
        valid.then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Rid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Result of a single poll request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The body has no waiting marker; it is final.
    Ready(String),
    /// The search is still running. Carries the body in case it is the last one.
    StillWaiting(String),
    /// The request itself failed.
    TransportError(TransportError),
}

impl PollOutcome {
    /// Classify a Get response body.
    pub fn from_body(body: String) -> Self {
        if body.contains(WAITING_MARKER) {
            PollOutcome::StillWaiting(body)
        } else {
            PollOutcome::Ready(body)
        }
    }

    /// Label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            PollOutcome::Ready(_) => "ready",
            PollOutcome::StillWaiting(_) => "waiting",
            PollOutcome::TransportError(_) => "transport_error",
        }
    }
}
