pub mod blast;
pub mod config;
pub mod metrics;
pub mod testing;

pub use blast::{
    extract_rid, BlastTransport, JobSubmitter, NcbiBlastClient, PollError, PollOutcome,
    PollPolicy, RelayError, ResultPoller, Rid, SequenceRelay, SubmitError, TransportError,
    WAITING_MARKER,
};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, BlastConfig,
    Config, ConfigError, OnExhausted, ServerConfig, StaticFilesConfig,
};
