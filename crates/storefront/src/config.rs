//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LEVELUP_API_URL` - Base URL of the backend REST API
//!   (default: `http://localhost:8080/api/v1`)
//! - `LEVELUP_STORAGE_DIR` - Directory for persisted cart/session state
//!   (default: `.levelup` in the working directory)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend location for local development.
const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";

/// Default storage directory name.
const DEFAULT_STORAGE_DIR: &str = ".levelup";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend REST API.
    pub api_base_url: Url,
    /// Directory holding the persisted key-value store.
    pub storage_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `LEVELUP_API_URL` is set but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("LEVELUP_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("LEVELUP_API_URL".to_string(), e.to_string()))?;
        let storage_dir = PathBuf::from(get_env_or_default(
            "LEVELUP_STORAGE_DIR",
            DEFAULT_STORAGE_DIR,
        ));

        Ok(Self {
            api_base_url,
            storage_dir,
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url_parses() {
        let url = DEFAULT_API_URL.parse::<Url>().unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn test_get_env_or_default_falls_back() {
        assert_eq!(
            get_env_or_default("LEVELUP_SURELY_UNSET_VAR", "valor"),
            "valor"
        );
    }
}
