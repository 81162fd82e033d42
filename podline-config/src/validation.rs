use thiserror::Error;

use crate::models::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push(&mut self, message: impl Into<String>) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint(
        &mut self,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("fetch.timeout must be greater than zero")]
    ZeroTimeout,
    #[error("{key} must be greater than zero")]
    ZeroLimit { key: &'static str },
}

/// Reject settings the service cannot run with; warn about risky ones.
pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    if config.fetch.timeout.is_zero() {
        return Err(ConfigGuardRailError::ZeroTimeout);
    }
    if config.fetch.max_page_bytes == 0 {
        return Err(ConfigGuardRailError::ZeroLimit {
            key: "fetch.max_page_bytes",
        });
    }
    if config.fetch.max_image_bytes == 0 {
        return Err(ConfigGuardRailError::ZeroLimit {
            key: "fetch.max_image_bytes",
        });
    }

    let mut warnings = ConfigWarnings::default();
    if !config.dev_mode && config.cors.is_wildcard_included() {
        warnings.push_with_hint(
            "CORS allow-list contains '*' outside dev mode",
            "List the web client origins explicitly in CORS_ALLOWED_ORIGINS",
        );
    }
    if config.dev_mode {
        warnings.push("dev mode enabled: CORS is permissive");
    }

    Ok(warnings)
}
