use serde::Deserialize;
use std::path::PathBuf;

use crate::util::{non_empty_var, parse_bool_var, parse_csv_var};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub fetch: FileFetchConfig,
    #[serde(default)]
    pub gradient: FileGradientConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
    pub dev_mode: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileFetchConfig {
    /// Humantime duration, e.g. `"10s"` or `"1500ms"`.
    pub timeout: Option<String>,
    pub user_agent: Option<String>,
    pub max_page_bytes: Option<usize>,
    pub max_image_bytes: Option<usize>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileGradientConfig {
    pub skip_near_white: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileCorsConfig {
    pub allowed_origins: Option<Vec<String>>,
}

/// Environment-derived configuration values.
///
/// Numeric and duration values are kept raw so the loader can report the
/// offending variable instead of silently ignoring it.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<String>,
    pub fetch_timeout: Option<String>,
    pub fetch_user_agent: Option<String>,
    pub fetch_max_page_bytes: Option<String>,
    pub fetch_max_image_bytes: Option<String>,
    pub gradient_skip_near_white: Option<bool>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub dev_mode: Option<bool>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: non_empty_var("PODLINE_CONFIG").map(PathBuf::from),
            server_host: non_empty_var("SERVER_HOST"),
            server_port: non_empty_var("SERVER_PORT"),
            fetch_timeout: non_empty_var("FETCH_TIMEOUT"),
            fetch_user_agent: non_empty_var("FETCH_USER_AGENT"),
            fetch_max_page_bytes: non_empty_var("FETCH_MAX_PAGE_BYTES"),
            fetch_max_image_bytes: non_empty_var("FETCH_MAX_IMAGE_BYTES"),
            gradient_skip_near_white: parse_bool_var(
                "GRADIENT_SKIP_NEAR_WHITE",
            ),
            cors_allowed_origins: parse_csv_var("CORS_ALLOWED_ORIGINS"),
            dev_mode: parse_bool_var("DEV_MODE"),
        }
    }
}
