use std::sync::Arc;

use blastrelay_core::{BlastTransport, Config, PollPolicy, SequenceRelay};

/// Shared application state
pub struct AppState {
    config: Config,
    relay: SequenceRelay,
}

impl AppState {
    /// Build state around an injected transport. The relay is created once
    /// and shared by every request.
    pub fn new(config: Config, transport: Arc<dyn BlastTransport>) -> Self {
        let relay = SequenceRelay::new(transport, PollPolicy::from(&config.blast));
        Self { config, relay }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn relay(&self) -> &SequenceRelay {
        &self.relay
    }
}
