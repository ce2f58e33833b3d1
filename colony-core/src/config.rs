use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::Rank;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub sync: SyncConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

/// Limits applied when decoding colony views received from a server
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Largest player or permission entry count accepted in one view section
    pub max_players: u32,
    /// Largest byte length accepted for any string field
    pub max_string_len: u32,
}

impl SyncConfig {
    /// Upper bound accepted for `max_players`
    pub const MAX_PLAYERS_CEILING: u32 = 1 << 20;
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_players: 4096,
            max_string_len: 1024,
        }
    }
}

/// Where the admin tool keeps colony state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub permissions_path: String,
    pub profiles_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            permissions_path: "./colony/permissions.json".to_string(),
            profiles_path: "./colony/profiles.json".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // COLONY_SYNC__MAX_PLAYERS, COLONY_LOGGING__LEVEL, ...
        builder = builder.add_source(
            Environment::with_prefix("COLONY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Check for settings that would make the tool unusable
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(format!(
                "logging.format must be \"json\" or \"pretty\", got \"{}\"",
                self.logging.format
            ));
        }
        if (self.sync.max_players as usize) < Rank::COUNT {
            errors.push(format!(
                "sync.max_players must be at least {} to carry a full permission matrix",
                Rank::COUNT
            ));
        }
        if self.sync.max_players > SyncConfig::MAX_PLAYERS_CEILING {
            errors.push(format!(
                "sync.max_players must be at most {}, got {}",
                SyncConfig::MAX_PLAYERS_CEILING,
                self.sync.max_players
            ));
        }
        if self.sync.max_string_len == 0 {
            errors.push("sync.max_string_len must be greater than 0".to_string());
        }
        if self.storage.permissions_path.is_empty() {
            errors.push("storage.permissions_path must not be empty".to_string());
        }
        if self.storage.profiles_path.is_empty() {
            errors.push("storage.profiles_path must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.sync.max_players, 4096);
        assert_eq!(config.sync.max_string_len, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[sync]\nmax_players = 16\n\n[storage]\npermissions_path = \"/tmp/perms.json\""
        )
        .unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.sync.max_players, 16);
        assert_eq!(config.sync.max_string_len, 1024);
        assert_eq!(config.storage.permissions_path, "/tmp/perms.json");
        assert_eq!(config.storage.profiles_path, "./colony/profiles.json");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::from_file("/nonexistent/colony.toml").unwrap();
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_validate_caps_max_players() {
        let mut config = Config::default();
        config.sync.max_players = SyncConfig::MAX_PLAYERS_CEILING;
        assert!(config.validate().is_ok());

        config.sync.max_players = u32::MAX;
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("at most"));
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        config.sync.max_string_len = 0;
        config.sync.max_players = 2;
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
