use std::{fmt, sync::Arc};

use podline_config::Config;
use podline_core::{CardGenerator, FetchError};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: Arc<CardGenerator>,
}

impl AppState {
    /// Build the shared HTTP client and card generator from `config`.
    pub fn from_config(config: Config) -> Result<Self, FetchError> {
        let generator = CardGenerator::from_config(
            config.fetch.clone(),
            config.sampler_options(),
        )?;

        Ok(Self {
            config: Arc::new(config),
            generator: Arc::new(generator),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("bind_address", &self.config.bind_address())
            .finish_non_exhaustive()
    }
}
