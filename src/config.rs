//! Configuration management
//!
//! Settings are read from `config.toml` under the platform config directory
//! (`~/.config/creplay/config.toml` on Linux). Every field has a default, so
//! a missing file or a partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::player::{is_valid_rate, SchedulerConfig};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Clock step per tick, in milliseconds of recording time
    pub tick_interval_ms: u64,
    /// Switch tabs along with the recording
    pub follow_events: bool,
    /// Initial playback speed
    pub speed: f64,
    /// Speeds stepped through with `+` and `-`
    pub speeds: Vec<f64>,
    /// Seek distance of the arrow keys
    pub seek_step_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            follow_events: true,
            speed: 1.0,
            speeds: vec![0.25, 0.5, 1.0, 1.25, 1.5, 2.0],
            seek_step_ms: 5000,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `CREPLAY_LOG` is unset
    pub level: String,
    /// Write logs to this file instead of stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load the configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the configuration from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        Ok(config)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("creplay").join("config.toml"))
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<()> {
        let player = &self.player;
        if player.tick_interval_ms == 0 {
            bail!("player.tick_interval_ms must be greater than 0");
        }
        if !is_valid_rate(player.speed) {
            bail!("player.speed must be greater than 0 (got {})", player.speed);
        }
        if player.speeds.is_empty() {
            bail!("player.speeds must not be empty");
        }
        if let Some(bad) = player.speeds.iter().find(|s| !is_valid_rate(**s)) {
            bail!("player.speeds entries must be greater than 0 (got {})", bad);
        }
        Ok(())
    }

    /// Scheduler settings derived from `[player]`.
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            tick_interval: Duration::from_millis(self.player.tick_interval_ms),
            follow_events: self.player.follow_events,
            initial_rate: self.player.speed,
        }
    }
}
