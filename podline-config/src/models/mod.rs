pub mod sources;

use std::path::PathBuf;

use podline_core::{FetchConfig, SamplerOptions};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub fetch: FetchConfig,
    pub gradient: GradientConfig,
    pub cors: CorsConfig,
    pub dev_mode: bool,
    pub metadata: ConfigMetadata,
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn sampler_options(&self) -> SamplerOptions {
        self.gradient.sampler_options()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradientConfig {
    /// Drop near-white cover samples before composing.
    pub skip_near_white: bool,
}

impl GradientConfig {
    pub fn sampler_options(&self) -> SamplerOptions {
        SamplerOptions {
            skip_near_white: self.skip_near_white,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn is_wildcard_included(&self) -> bool {
        self.allowed_origins
            .iter()
            .any(|origin| origin.trim() == "*")
    }
}

/// Where the loaded values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
