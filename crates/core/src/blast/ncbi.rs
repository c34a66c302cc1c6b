//! NCBI BLAST URL API client.
//!
//! Both commands are plain GET requests against `Blast.cgi`. Query parameters
//! are added through reqwest's query builder so the sequence is always
//! percent-encoded.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Request, Url};
use tracing::{debug, warn};

use crate::config::BlastConfig;

use super::{BlastTransport, Rid, TransportError};

/// reqwest-backed [`BlastTransport`].
pub struct NcbiBlastClient {
    client: Client,
    base_url: Url,
    database: String,
    program: String,
}

impl NcbiBlastClient {
    /// Create a new client from the `[blast]` config section.
    pub fn new(config: &BlastConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            TransportError::Request(format!("Invalid base URL {}: {}", config.base_url, e))
        })?;

        Ok(Self {
            client,
            base_url,
            database: config.database.clone(),
            program: config.program.clone(),
        })
    }

    /// Build the `CMD=Put` request.
    fn submit_request(&self, sequence: &str) -> Result<Request, TransportError> {
        let request = self
            .client
            .get(self.base_url.clone())
            .query(&[
                ("CMD", "Put"),
                ("QUERY", sequence),
                ("DATABASE", self.database.as_str()),
                ("PROGRAM", self.program.as_str()),
            ])
            .build()?;
        Ok(request)
    }

    /// Build the `CMD=Get` request.
    fn fetch_request(&self, rid: &Rid) -> Result<Request, TransportError> {
        let request = self
            .client
            .get(self.base_url.clone())
            .query(&[
                ("CMD", "Get"),
                ("RID", rid.as_str()),
                ("FORMAT_TYPE", "Text"),
            ])
            .build()?;
        Ok(request)
    }

    /// Send a request and read the whole body as text, whatever the status.
    async fn execute_text(&self, request: Request) -> Result<String, TransportError> {
        let response = self.client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "BLAST returned non-success status");
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))
    }
}

#[async_trait]
impl BlastTransport for NcbiBlastClient {
    fn name(&self) -> &str {
        "ncbi"
    }

    async fn submit(&self, sequence: &str) -> Result<String, TransportError> {
        let request = self.submit_request(sequence)?;
        debug!(
            database = %self.database,
            program = %self.program,
            sequence_len = sequence.len(),
            "Submitting sequence to BLAST"
        );
        self.execute_text(request).await
    }

    async fn fetch_result(&self, rid: &Rid) -> Result<String, TransportError> {
        let request = self.fetch_request(rid)?;
        debug!(rid = %rid, "Fetching BLAST result");
        self.execute_text(request).await
    }
}
