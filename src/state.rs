// src/state.rs
use std::sync::Arc;

use crate::config::RelayConfig;
use crate::services::relay::PredictionClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub relay: PredictionClient,
}

impl AppState {
    pub fn new(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            relay: PredictionClient::new(config)?,
        })
    }

    pub fn shared(config: &RelayConfig) -> Result<SharedState, reqwest::Error> {
        Self::new(config).map(Arc::new)
    }
}
