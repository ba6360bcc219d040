//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, IndicatorSettings, LoggingConfig, LogFormat};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables use the `TA__SECTION__KEY` form, e.g.
/// `TA__LOGGING__LEVEL=debug`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("TA")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

/// Parse configuration from TOML text without consulting the environment.
pub fn from_toml_str(text: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(text)
}
