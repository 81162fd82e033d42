//! Shared configuration library for Podline.
//!
//! Settings are layered, lowest precedence first: built-in defaults, a TOML
//! file, `.env` plus the process environment. Command-line overrides are
//! applied by the binary on top of the loaded [`Config`].

pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError};
pub use models::{Config, ConfigMetadata, CorsConfig, GradientConfig, ServerConfig};
pub use validation::{ConfigWarning, ConfigWarnings};
