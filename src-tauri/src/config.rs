//! Application configuration
//!
//! Central location for configuration constants, resource limits, and the
//! platform endpoint configuration loaded at startup.
//!
//! The backend platform (GraphQL API, auth endpoint, object store) is a
//! deployment artifact, so its endpoints come from a JSON file in the app
//! config directory with per-field environment overrides.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ===== Remote Call Limits =====

/// Timeout applied to every platform request in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum accepted image upload size in bytes (10 MiB).
/// Larger files are rejected before any bytes leave the process.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// User agent sent with every platform request
pub const USER_AGENT: &str = concat!("NimbusNotes/", env!("CARGO_PKG_VERSION"));

// ===== Platform Configuration Sources =====

/// File name of the platform configuration in the app config directory
pub const CONFIG_FILE_NAME: &str = "platform.json";

/// Environment variable overriding the platform configuration file path
pub const ENV_CONFIG_PATH: &str = "NIMBUS_PLATFORM_CONFIG";

/// Per-field environment overrides
pub const ENV_API_URL: &str = "NIMBUS_API_URL";
pub const ENV_AUTH_URL: &str = "NIMBUS_AUTH_URL";
pub const ENV_STORAGE_URL: &str = "NIMBUS_STORAGE_URL";
pub const ENV_API_KEY: &str = "NIMBUS_API_KEY";

/// Endpoints and credentials for the managed backend platform
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// GraphQL query/mutation endpoint
    #[serde(default)]
    pub api_url: String,
    /// Token endpoint of the platform's auth service
    #[serde(default)]
    pub auth_url: String,
    /// Base URL of the platform's object store
    #[serde(default)]
    pub storage_url: String,
    /// Optional API key, used when no user session is active
    #[serde(default)]
    pub api_key: Option<String>,
}

impl PlatformConfig {
    /// Load the platform configuration for the given app config directory.
    ///
    /// Resolution order: explicit path from `NIMBUS_PLATFORM_CONFIG`, then
    /// `platform.json` in the config directory. Environment overrides are
    /// applied on top, and the result is validated.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir.join(CONFIG_FILE_NAME));

        Self::load_from(&path)
    }

    /// Load from a specific file path, falling back to defaults when the
    /// file does not exist (environment variables may still fill it in).
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            tracing::info!("Loading platform configuration from: {:?}", path);
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        } else {
            tracing::info!("No platform configuration file at {:?}, using environment", path);
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.api_url = url;
        }
        if let Ok(url) = std::env::var(ENV_AUTH_URL) {
            self.auth_url = url;
        }
        if let Ok(url) = std::env::var(ENV_STORAGE_URL) {
            self.storage_url = url;
        }
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            self.api_key = Some(key);
        }
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("api_url", &self.api_url),
            ("auth_url", &self.auth_url),
            ("storage_url", &self.storage_url),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "missing required platform endpoint: {}",
                    field
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_complete_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "api_url": "https://api.example.cloud/graphql",
                "auth_url": "https://auth.example.cloud",
                "storage_url": "https://storage.example.cloud",
                "api_key": "da2-testkey"
            }"#,
        );

        let config = PlatformConfig::load_from(&path).unwrap();

        assert_eq!(config.api_url, "https://api.example.cloud/graphql");
        assert_eq!(config.auth_url, "https://auth.example.cloud");
        assert_eq!(config.storage_url, "https://storage.example.cloud");
        assert_eq!(config.api_key.as_deref(), Some("da2-testkey"));
    }

    #[test]
    fn test_missing_endpoint_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{ "api_url": "https://api.example.cloud/graphql" }"#,
        );

        let result = PlatformConfig::load_from(&path);

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "not json");

        let result = PlatformConfig::load_from(&path);

        assert!(matches!(result, Err(AppError::Serialization(_))));
    }
}
