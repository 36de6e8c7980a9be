//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{api, storage};
use crate::error::{Error, Result};
use crate::types::Edition;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application version
    app_version: String,
    /// Selected translation edition; affects every fetch and cache key
    pub edition: Edition,
    /// Base URL of the remote text API
    pub api_base_url: String,
    /// Directory holding favorites and cache files
    pub data_dir: PathBuf,
    /// HTTP request timeout
    pub timeout: Duration,
}

impl Config {
    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Directory holding cache entries.
    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.join(storage::CACHE_DIR)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            edition: Edition::default(),
            api_base_url: api::DEFAULT_BASE_URL.to_string(),
            data_dir: default_data_dir(),
            timeout: Duration::from_secs(api::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(edition) = env::var("QURANFLOW_EDITION") {
            config.edition = Edition::new(edition.trim());
        }

        if let Ok(url) = env::var("QURANFLOW_API_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(path) = env::var("QURANFLOW_DATA_DIR") {
            config.data_dir = PathBuf::from(shellexpand::tilde(&path).to_string());
        }

        if let Ok(secs) = env::var("QURANFLOW_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.timeout = Duration::from_secs(secs);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every request fail
    pub fn validate(&self) -> Result<()> {
        if self.edition.as_str().is_empty() {
            return Err(Error::config(
                "Translation edition is empty",
                "Set QURANFLOW_EDITION to an identifier such as en.asad or en.sahih",
            ));
        }
        if self.edition.is_arabic() {
            return Err(Error::config(
                "Translation edition cannot be the Arabic source edition",
                "Set QURANFLOW_EDITION to a translation such as en.asad",
            ));
        }
        if !self.api_base_url.starts_with("http") {
            return Err(Error::config(
                format!("Invalid API URL '{}'", self.api_base_url),
                "QURANFLOW_API_URL must start with http:// or https://",
            ));
        }
        Ok(())
    }
}

/// Platform data directory, falling back to a dotfile directory in the cwd.
fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(format!(".{}", storage::APP_DIR)),
        |d| d.join(storage::APP_DIR),
    )
}
