//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority (last wins)                   │
//! │                                                                         │
//! │  1. Defaults ─────────────► http://localhost:3000, batoiBooksCart, 5s   │
//! │  2. batoi.toml ───────────► platform config dir, or --config <path>     │
//! │  3. Environment ──────────► BATOI_API_URL, BATOI_DB_PATH,               │
//! │                             BATOI_CART_KEY, BATOI_MESSAGE_LIFETIME_MS,  │
//! │                             BATOI_API_TIMEOUT_SECS                      │
//! │  4. validate() ───────────► rejects unusable values                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # batoi.toml
//! [api]
//! base_url = "http://localhost:3000"
//! timeout_secs = 10
//!
//! [storage]
//! database_path = "/home/me/.local/share/batoi-books/batoi.db"
//! cart_key = "batoiBooksCart"
//!
//! [notifications]
//! lifetime_ms = 5000
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use batoi_core::{CART_STORAGE_KEY, MESSAGE_LIFETIME_MS};

use crate::error::AppError;

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::config(err.to_string())
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Remote books service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Defaults to the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_cart_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            cart_key: default_cart_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_lifetime_ms")]
    pub lifetime_ms: u64,
}

fn default_lifetime_ms() -> u64 {
    MESSAGE_LIFETIME_MS
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            lifetime_ms: default_lifetime_ms(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl AppConfig {
    /// Loads configuration from file and environment.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::Invalid(format!("api.base_url '{}': {}", self.api.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.cart_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.cart_key must not be empty".into()));
        }

        if self.notifications.lifetime_ms == 0 {
            return Err(ConfigError::Invalid(
                "notifications.lifetime_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `BATOI_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BATOI_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(path) = lookup("BATOI_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("BATOI_CART_KEY") {
            self.storage.cart_key = key;
        }

        if let Some(raw) = lookup("BATOI_MESSAGE_LIFETIME_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => self.notifications.lifetime_ms = ms,
                Err(_) => warn!(value = %raw, "Ignoring non-numeric BATOI_MESSAGE_LIFETIME_MS"),
            }
        }

        if let Some(raw) = lookup("BATOI_API_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %raw, "Ignoring non-numeric BATOI_API_TIMEOUT_SECS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("batoi.toml"))
    }

    /// Database file: the configured one, or `batoi.db` in the platform data
    /// directory (created if missing).
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or_else(|| {
            ConfigError::Invalid("Could not determine app data directory".into())
        })?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join("batoi.db"))
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn message_lifetime(&self) -> Duration {
        Duration::from_millis(self.notifications.lifetime_ms)
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("es", "batoi", "books")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.storage.cart_key, "batoiBooksCart");
        assert_eq!(config.message_lifetime(), Duration::from_millis(5000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.api.base_url = "ftp://books".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "https://books.example.com/api".to_string();
        assert!(config.validate().is_ok());

        config.storage.cart_key = "  ".to_string();
        assert!(config.validate().is_err());

        config.storage.cart_key = "cart".to_string();
        config.notifications.lifetime_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[
            ("BATOI_API_URL", "http://api:8080"),
            ("BATOI_DB_PATH", "/tmp/books.db"),
            ("BATOI_MESSAGE_LIFETIME_MS", "250"),
            ("BATOI_API_TIMEOUT_SECS", "soon"),
        ]));

        assert_eq!(config.api.base_url, "http://api:8080");
        assert_eq!(
            config.storage.database_path,
            Some(PathBuf::from("/tmp/books.db"))
        );
        assert_eq!(config.notifications.lifetime_ms, 250);
        // Unparseable values are ignored
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://10.0.0.5:3000"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://10.0.0.5:3000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.storage.cart_key, "batoiBooksCart");
        assert_eq!(config.notifications.lifetime_ms, 5000);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batoi.toml");
        std::fs::write(
            &path,
            "[storage]\ncart_key = \"otherCart\"\n[notifications]\nlifetime_ms = 1200\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(path)).unwrap();

        assert_eq!(config.storage.cart_key, "otherCart");
        assert_eq!(config.notifications.lifetime_ms, 1200);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batoi.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(matches!(
            AppConfig::load(Some(path.clone())),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(
            AppConfig::load_or_default(Some(path)).storage.cart_key,
            "batoiBooksCart"
        );
    }
}
