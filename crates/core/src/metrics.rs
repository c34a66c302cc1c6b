//! Prometheus metrics for the BLAST relay core.
//!
//! Registered by the server in its registry via [`all_metrics`].

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Submission
// =============================================================================

/// Submissions by result.
pub static SUBMISSIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("blastrelay_submissions_total", "Total BLAST submissions"),
        &["result"], // "ok", "no_ticket", "transport_error"
    )
    .unwrap()
});

// =============================================================================
// Polling
// =============================================================================

/// Poll requests sent.
pub static POLL_ATTEMPTS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "blastrelay_poll_attempts_total",
        "Total BLAST poll requests sent",
    )
    .unwrap()
});

/// Poll requests by outcome.
pub static POLL_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "blastrelay_poll_outcomes_total",
            "BLAST poll requests by outcome",
        ),
        &["outcome"], // "ready", "waiting", "transport_error"
    )
    .unwrap()
});

/// Poll sequences that ran out of attempts.
pub static POLL_EXHAUSTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "blastrelay_poll_exhausted_total",
        "Poll sequences that used every attempt while BLAST was still waiting",
    )
    .unwrap()
});

// =============================================================================
// Relay
// =============================================================================

/// End-to-end relay duration in seconds.
pub static RELAY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "blastrelay_relay_duration_seconds",
            "Duration of submit-and-poll runs",
        )
        .buckets(vec![1.0, 5.0, 10.0, 20.0, 30.0, 45.0, 60.0, 90.0, 120.0]),
        &["result"],
    )
    .unwrap()
});

/// All core metrics, for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SUBMISSIONS.clone()),
        Box::new(POLL_ATTEMPTS.clone()),
        Box::new(POLL_OUTCOMES.clone()),
        Box::new(POLL_EXHAUSTED.clone()),
        Box::new(RELAY_DURATION.clone()),
    ]
}
