//! Infrastructure shared by both example binaries: configuration, logging and state.

use config::Config;
use kauth::oauth::Provider;
use std::sync::Arc;

pub mod config;
pub mod logging;

// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub provider: Arc<dyn Provider>,
}

impl AppState {
    pub fn new(app_config: Config, provider: Arc<dyn Provider>) -> Self {
        Self {
            config: app_config,
            provider,
        }
    }

    pub fn provider_ref(&self) -> &dyn Provider {
        self.provider.as_ref()
    }
}
