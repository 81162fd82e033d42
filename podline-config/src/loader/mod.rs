pub mod error;

use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use podline_core::FetchConfig;

use crate::{
    models::{
        Config, ConfigMetadata, CorsConfig, GradientConfig, ServerConfig,
        sources::{EnvConfig, FileConfig},
    },
    validation::{self, ConfigWarnings},
};
use error::ConfigLoadError;

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("podline.toml"),
        PathBuf::from("config/podline.toml"),
    ]
});

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env`, read the process environment, then compose.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        let mut load = self.load_from_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Compose against an explicit environment snapshot. Does not touch
    /// `.env` or the process environment.
    pub fn load_from_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        compose_config(file_config, env, config_path)
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true),
            None => dotenvy::dotenv().map(|_| true),
        };

        match loaded {
            Ok(loaded) => Ok(loaded),
            Err(dotenvy::Error::Io(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        // An explicitly named file must exist; defaults are best-effort.
        let (path, explicit) = match (&self.options.config_path, &env.config_path)
        {
            (Some(path), _) | (None, Some(path)) => (path.clone(), true),
            (None, None) => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(path) => (path.clone(), false),
                None => return Ok((None, None)),
            },
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge file and environment values over the defaults. Environment wins.
pub fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
) -> Result<ConfigLoad, ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if config_path.is_none() {
        warnings.push_with_hint(
            "No podline.toml detected; using environment variables and defaults",
            "Pass --config or set PODLINE_CONFIG to use a configuration file",
        );
    }

    let FileConfig {
        server: file_server,
        fetch: file_fetch,
        gradient: file_gradient,
        cors: file_cors,
        dev_mode: file_dev_mode,
    } = file_config.unwrap_or_default();

    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: parse_env_value("SERVER_PORT", env.server_port.as_deref())?
            .or(file_server.port)
            .unwrap_or(DEFAULT_PORT),
    };

    let defaults = FetchConfig::default();
    let timeout = match (env.fetch_timeout, file_fetch.timeout) {
        (Some(raw), _) => parse_duration("FETCH_TIMEOUT", &raw)?,
        (None, Some(raw)) => parse_duration("fetch.timeout", &raw)?,
        (None, None) => defaults.timeout,
    };
    let fetch = FetchConfig {
        timeout,
        user_agent: env
            .fetch_user_agent
            .or(file_fetch.user_agent)
            .unwrap_or(defaults.user_agent),
        max_page_bytes: parse_env_value(
            "FETCH_MAX_PAGE_BYTES",
            env.fetch_max_page_bytes.as_deref(),
        )?
        .or(file_fetch.max_page_bytes)
        .unwrap_or(defaults.max_page_bytes),
        max_image_bytes: parse_env_value(
            "FETCH_MAX_IMAGE_BYTES",
            env.fetch_max_image_bytes.as_deref(),
        )?
        .or(file_fetch.max_image_bytes)
        .unwrap_or(defaults.max_image_bytes),
    };

    let gradient = GradientConfig {
        skip_near_white: env
            .gradient_skip_near_white
            .or(file_gradient.skip_near_white)
            .unwrap_or(false),
    };

    let cors = CorsConfig {
        allowed_origins: env
            .cors_allowed_origins
            .or(file_cors.allowed_origins)
            .unwrap_or_else(default_cors_origins),
    };

    let config = Config {
        server,
        fetch,
        gradient,
        cors,
        dev_mode: env.dev_mode.or(file_dev_mode).unwrap_or(false),
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded: false,
        },
    };

    warnings.extend(validation::apply_guard_rails(&config)?);

    Ok(ConfigLoad { config, warnings })
}

fn parse_env_value<T: FromStr>(
    key: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, ConfigLoadError> {
    raw.map(|value| {
        value
            .trim()
            .parse()
            .map_err(|_| ConfigLoadError::InvalidValue {
                key,
                value: value.to_string(),
            })
    })
    .transpose()
}

fn parse_duration(
    key: &'static str,
    raw: &str,
) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(raw.trim()).map_err(|source| {
        ConfigLoadError::InvalidDuration {
            key,
            value: raw.to_string(),
            source,
        }
    })
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let ConfigLoad { config, warnings } =
            compose_config(None, EnvConfig::default(), None).unwrap();

        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.fetch, FetchConfig::default());
        assert!(!config.gradient.skip_near_white);
        assert!(!config.dev_mode);
        assert_eq!(config.cors.allowed_origins, default_cors_origins());
        assert_eq!(warnings.items.len(), 1);
    }

    #[test]
    fn test_env_overrides_file() {
        let file: FileConfig = toml::from_str(
            r#"
            [server]
            port = 8080
            host = "127.0.0.1"

            [fetch]
            timeout = "3s"
            "#,
        )
        .unwrap();
        let env = EnvConfig {
            server_port: Some("9090".to_string()),
            fetch_timeout: Some("1500ms".to_string()),
            ..EnvConfig::default()
        };

        let load =
            compose_config(Some(file), env, Some("podline.toml".into())).unwrap();
        assert_eq!(load.config.server.port, 9090);
        assert_eq!(load.config.server.host, "127.0.0.1");
        assert_eq!(load.config.fetch.timeout, Duration::from_millis(1500));
        assert!(load.warnings.is_empty());
    }

    #[test]
    fn test_invalid_env_values_are_reported() {
        let env = EnvConfig {
            server_port: Some("eighty".to_string()),
            ..EnvConfig::default()
        };
        let err = compose_config(None, env, None).unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::InvalidValue {
                key: "SERVER_PORT",
                ..
            }
        ));

        let env = EnvConfig {
            fetch_timeout: Some("soon".to_string()),
            ..EnvConfig::default()
        };
        let err = compose_config(None, env, None).unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::InvalidDuration {
                key: "FETCH_TIMEOUT",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let env = EnvConfig {
            fetch_max_image_bytes: Some("0".to_string()),
            ..EnvConfig::default()
        };
        let err = compose_config(None, env, None).unwrap_err();
        assert!(matches!(err, ConfigLoadError::GuardRail(_)));
    }
}
