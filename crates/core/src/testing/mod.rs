//! Testing utilities and a mock BLAST transport.
//!
//! # Example
//!
//! ```rust,ignore
//! use blastrelay_core::testing::{fixtures, MockBlastTransport};
//!
//! let transport = Arc::new(MockBlastTransport::new());
//! transport.push_submit_response(fixtures::put_response("ABC123-X")).await;
//! transport.push_poll_response(fixtures::waiting_response()).await;
//! transport.push_poll_response(fixtures::report_text()).await;
//!
//! let relay = SequenceRelay::new(transport.clone(), PollPolicy::default());
//! ```

mod mock_blast_transport;

pub use mock_blast_transport::{MockBlastTransport, RecordedPoll};

/// Canned BLAST URL API response bodies.
pub mod fixtures {
    /// A `CMD=Put` response carrying the given RID.
    pub fn put_response(rid: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<body>\n<!--QBlastInfoBegin\n    RID = {}\n    RTOE = 18\nQBlastInfoEnd\n-->\n</body>\n</html>\n",
            rid
        )
    }

    /// A `CMD=Put` response for a rejected query (no RID).
    pub fn put_response_without_rid() -> String {
        "<!DOCTYPE html>\n<html>\n<body>\n<p class=\"error\">Message ID#24 Error: Failed to read the Blast query: Nucleotide FASTA provided for protein sequence</p>\n</body>\n</html>\n"
            .to_string()
    }

    /// A `CMD=Get` response while the search is still running.
    pub fn waiting_response() -> String {
        "<!DOCTYPE html>\n<html>\n<body>\n<!--QBlastInfoBegin\n\tStatus=WAITING\nQBlastInfoEnd\n-->\n<p>This page will be automatically updated in <b>5</b> seconds</p>\n</body>\n</html>\n"
            .to_string()
    }

    /// A finished text report.
    pub fn report_text() -> String {
        "BLASTN 2.15.0+\n\n\nRID: ABC123-X\n\n\nDatabase: Core nucleotide BLAST database\n\nQuery= \nLength=24\n\n\n                                                                  Score     E\nSequences producing significant alignments:                      (Bits)  Value\n\nNC_000913.3 Escherichia coli str. K-12 substr. MG1655             44.6    2e-04\n"
            .to_string()
    }
}
