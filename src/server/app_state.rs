use std::{sync::Arc, time::Instant};

use crate::{
    common::types::PartyId,
    configs::Config,
    playback::{Clock, SystemClock},
    server::PartyRegistry,
};

/// Top-level application state.
pub struct AppState {
    pub registry: PartyRegistry,
    pub config: Config,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Builds the state around an explicit clock and registers the seeded parties.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        let registry = PartyRegistry::new(config.player.end_of_song, clock);
        for id in &config.parties.seed {
            registry.register_party(PartyId(*id));
        }

        Self {
            registry,
            config,
            start_time: Instant::now(),
        }
    }
}
