use std::path::PathBuf;

use crate::errors::AppError;

/// Default Stormglass API base URL.
const DEFAULT_API_URL: &str = "https://api.stormglass.io";

/// Default output directory for per-spot documents.
const DEFAULT_OUTPUT_DIR: &str = "docs";

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Stormglass API key, sent as the `Authorization` header.
    pub api_key: String,
    /// Base URL of the Stormglass API (overridable for tests).
    pub api_url: String,
    /// Directory the per-spot JSON documents are written to.
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// The API key is required; everything else has a default. A missing key
    /// is a configuration error raised before any network activity.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = std::env::var("STORMGLASS_API_KEY").map_err(|_| {
            AppError::Configuration("STORMGLASS_API_KEY must be set".to_string())
        })?;

        Ok(Self {
            api_key,
            api_url: std::env::var("STORMGLASS_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            output_dir: std::env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string())
                .into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // NOTE: set_var/remove_var in tests is unsafe in multi-threaded contexts
    // (Rust may run tests in parallel). Both paths are exercised in a single
    // test so the env mutations cannot race each other.
    #[test]
    fn test_from_env() {
        unsafe {
            std::env::remove_var("STORMGLASS_API_KEY");
        }

        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("STORMGLASS_API_KEY"));

        unsafe {
            std::env::set_var("STORMGLASS_API_KEY", "test-key");
            std::env::remove_var("STORMGLASS_API_URL");
            std::env::remove_var("OUTPUT_DIR");
        }

        let config = AppConfig::from_env().unwrap();

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.api_url, "https://api.stormglass.io");
        assert_eq!(config.output_dir, PathBuf::from("docs"));
    }
}
