//! Trainer configuration.
//!
//! Config file: `$MATHTRAINER_CONFIG` or `~/.config/mathtrainer/config.toml`.
//! Every section and key is optional; a missing file means defaults.

use crate::error::{Result, TrainerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Env var pointing at an explicit config file
pub const CONFIG_ENV: &str = "MATHTRAINER_CONFIG";

/// Env var overriding the sync credential
pub const TOKEN_ENV: &str = "MATHTRAINER_TOKEN";

/// How long an achievement notification stays visible
pub const DEFAULT_NOTIFICATION_MS: u64 = 3200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the player record
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir() }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mathtrainer")
}

/// Remote profile mirror settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer credential; `MATHTRAINER_TOKEN` takes precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl SyncConfig {
    /// Credential to sync with, if sync is enabled and one is available
    pub fn credential(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.token.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { display_ms: default_display_ms() }
    }
}

fn default_display_ms() -> u64 {
    DEFAULT_NOTIFICATION_MS
}

impl NotificationConfig {
    pub fn display_duration(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }
}

/// Main trainer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl TrainerConfig {
    /// Default user config path: ~/.config/mathtrainer/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mathtrainer").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// Priority:
    /// 1. `$MATHTRAINER_CONFIG` (must exist)
    /// 2. User config (~/.config/mathtrainer/config.toml)
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            return Self::load_from(Path::new(&explicit));
        }
        match Self::user_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            TrainerError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
            .map_err(|e| TrainerError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: TrainerConfig = toml::from_str(contents)?;
        if config.notifications.display_ms == 0 {
            return Err(TrainerError::Config("notifications.display_ms must be positive".to_string()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrainerConfig::default();
        assert!(!config.sync.enabled);
        assert_eq!(config.notifications.display_ms, 3200);
        assert!(config.storage.data_dir.ends_with("mathtrainer"));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(TrainerConfig::from_toml_str("").unwrap(), TrainerConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = TrainerConfig::from_toml_str(
            r#"
            [storage]
            data_dir = "/tmp/trainer"

            [sync]
            enabled = true
            token = "abc"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/trainer"));
        assert!(config.sync.enabled);
        assert_eq!(config.sync.timeout_secs, 10);
        assert_eq!(config.sync.token.as_deref(), Some("abc"));
        assert_eq!(config.notifications.display_duration(), Duration::from_millis(3200));
    }

    #[test]
    fn test_disabled_sync_has_no_credential() {
        let config = SyncConfig { token: Some("abc".to_string()), ..Default::default() };
        assert_eq!(config.credential(), None);
    }

    #[test]
    fn test_zero_display_rejected() {
        assert!(TrainerConfig::from_toml_str("[notifications]\ndisplay_ms = 0").is_err());
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(TrainerConfig::from_toml_str("[sync\nenabled = ").is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = TrainerConfig::load_from(Path::new("/nonexistent/mathtrainer.toml")).unwrap_err();
        assert_eq!(err.kind(), "config");
    }
}
