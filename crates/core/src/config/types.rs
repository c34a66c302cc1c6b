use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub blast: BlastConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    3000
}

/// What the poller does when every attempt still reports the job as waiting.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OnExhausted {
    /// Hand back the body of the last poll, waiting marker included.
    #[default]
    ReturnLastBody,
    /// Fail with `PollError::Exhausted`.
    Fail,
}

/// Remote BLAST service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlastConfig {
    /// Blast.cgi endpoint (e.g., "https://blast.ncbi.nlm.nih.gov/blast/Blast.cgi")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Database searched by every submission
    #[serde(default = "default_database")]
    pub database: String,
    /// BLAST program used by every submission
    #[serde(default = "default_program")]
    pub program: String,
    /// Delay before each poll, in seconds (default: 5)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Maximum number of poll requests per submission (default: 10)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Timeout for a single upstream request, in seconds (default: 60)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// User-Agent sent to the upstream service
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub on_exhausted: OnExhausted,
}

fn default_base_url() -> String {
    "https://blast.ncbi.nlm.nih.gov/blast/Blast.cgi".to_string()
}

fn default_database() -> String {
    "core_nt".to_string()
}

fn default_program() -> String {
    "blastn".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    10
}

fn default_request_timeout() -> u64 {
    60
}

fn default_user_agent() -> String {
    format!("blastrelay/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for BlastConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            database: default_database(),
            program: default_program(),
            poll_interval_secs: default_poll_interval(),
            max_attempts: default_max_attempts(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
            on_exhausted: OnExhausted::default(),
        }
    }
}

/// Static page configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticFilesConfig {
    /// Directory holding index.html, results.html and favicon.ico
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            dir: default_static_dir(),
        }
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}
