// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{ApiError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `RECIPEBOX_DATABASE__URL`
pub const ENV_PREFIX: &str = "RECIPEBOX";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest, applied by the caller)
    /// 2. Environment variables
    /// 3. Config file
    /// 4. Defaults (lowest)
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path
            .map(str::to_string)
            .unwrap_or_else(Self::default_config_path);

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // An explicitly passed file must exist, the default one may not
            .add_source(File::with_name(&path).required(config_path.is_some()))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ApiError::Config(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".recipebox")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
