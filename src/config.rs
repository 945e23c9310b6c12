//! Configuration management for robots

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging::{ListenerFaultPolicy, DEFAULT_LOG_CAPACITY};
use crate::model::Point;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of log entries kept in memory (must be at least 1)
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,

    /// Simulation step interval in milliseconds (default: 5)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Terminal event poll / redraw interval in milliseconds (default: 16 = ~60fps)
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Width of the simulated world in world units
    #[serde(default = "default_world_width")]
    pub world_width: f64,

    /// Height of the simulated world in world units
    #[serde(default = "default_world_height")]
    pub world_height: f64,

    /// What to do when a log listener panics: "isolate" or "propagate"
    #[serde(default)]
    pub listener_fault_policy: ListenerFaultPolicy,

    /// tracing filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_capacity() -> usize {
    DEFAULT_LOG_CAPACITY.get()
}

fn default_tick_interval_ms() -> u64 {
    5
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_world_width() -> f64 {
    400.0
}

fn default_world_height() -> f64 {
    300.0
}

fn default_log_filter() -> String {
    "robots=debug".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_capacity: default_log_capacity(),
            tick_interval_ms: default_tick_interval_ms(),
            frame_interval_ms: default_frame_interval_ms(),
            world_width: default_world_width(),
            world_height: default_world_height(),
            listener_fault_policy: ListenerFaultPolicy::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from the default file, or return defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or return defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Reject values the simulation cannot run with
    ///
    /// Nothing is clamped: a zero log capacity is an error, not a capacity of one.
    pub fn validate(&self) -> Result<()> {
        if self.log_capacity == 0 {
            anyhow::bail!("log_capacity must be at least 1");
        }
        if self.tick_interval_ms == 0 {
            anyhow::bail!("tick_interval_ms must be at least 1");
        }
        if self.frame_interval_ms == 0 {
            anyhow::bail!("frame_interval_ms must be at least 1");
        }
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            anyhow::bail!(
                "world size must be positive, got {}x{}",
                self.world_width,
                self.world_height
            );
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// World size as the robot's window bounds
    pub fn world_bounds(&self) -> Point {
        Point::new(self.world_width, self.world_height)
    }
}

/// Get the base configuration directory (~/.robots)
/// Falls back to ./.robots if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".robots")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".robots"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Ensure the configuration directory exists
pub fn ensure_directories() -> Result<()> {
    std::fs::create_dir_all(config_dir()).context("Failed to create config directory")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_capacity, 100);
        assert_eq!(config.tick_interval_ms, 5);
        assert_eq!(config.listener_fault_policy, ListenerFaultPolicy::Isolate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.listener_fault_policy = ListenerFaultPolicy::Propagate;
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("listener_fault_policy = \"propagate\""));
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: Config = toml::from_str("log_capacity = 7").unwrap();
        assert_eq!(parsed.log_capacity, 7);
        assert_eq!(parsed.frame_interval_ms, 16);
        assert_eq!(parsed.log_filter, "robots=debug");
    }

    #[test]
    fn test_zero_capacity_is_rejected_not_clamped() {
        let config = Config {
            log_capacity: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_world_is_rejected() {
        let config = Config {
            world_height: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let config = Config {
            log_capacity: 250,
            world_width: 640.0,
            ..Config::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "log_capacity = 0").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_config_dir_does_not_panic() {
        let dir = config_dir();
        assert!(dir.ends_with(".robots"));
    }
}
