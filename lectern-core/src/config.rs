use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::player::UnmuteVolume;

/// Quiet period before the transport controls auto-hide
pub const DEFAULT_CONTROLS_QUIET_PERIOD_MS: u64 = 3000;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// `unmute_volume` accepts either a level or the word `remembered`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum UnmuteVolumeYaml {
    Level(f32),
    Mode(String),
}

/// YAML config file structure. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigYaml {
    controls_quiet_period_ms: Option<u64>,
    initial_volume: Option<f32>,
    unmute_volume: Option<UnmuteVolumeYaml>,
    #[serde(default)]
    auto_advance: bool,
}

/// Lesson player configuration
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerConfig {
    /// Pointer inactivity after which controls hide while playing
    pub controls_quiet_period: Duration,
    /// Volume applied to the media element at session start
    pub initial_volume: f32,
    /// What unmute restores
    pub unmute_volume: UnmuteVolume,
    /// Start the next lecture automatically when the current one ends
    pub auto_advance: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            controls_quiet_period: Duration::from_millis(DEFAULT_CONTROLS_QUIET_PERIOD_MS),
            initial_volume: 1.0,
            unmute_volume: UnmuteVolume::default(),
            auto_advance: false,
        }
    }
}

impl PlayerConfig {
    /// Read a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        info!("Loaded player config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map
        let raw: ConfigYaml = if yaml.trim().is_empty() {
            ConfigYaml::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Serialization(e.to_string()))?
        };
        Self::from_yaml(raw)
    }

    fn from_yaml(raw: ConfigYaml) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let controls_quiet_period = match raw.controls_quiet_period_ms {
            Some(ms) => quiet_period_from_ms(ms)?,
            None => defaults.controls_quiet_period,
        };
        let initial_volume = match raw.initial_volume {
            Some(volume) => initial_volume(volume)?,
            None => defaults.initial_volume,
        };
        let unmute_volume = match raw.unmute_volume {
            Some(UnmuteVolumeYaml::Level(level)) => fixed_unmute_volume(level)?,
            Some(UnmuteVolumeYaml::Mode(mode)) => parse_unmute_volume(&mode)?,
            None => defaults.unmute_volume,
        };
        Ok(Self {
            controls_quiet_period,
            initial_volume,
            unmute_volume,
            auto_advance: raw.auto_advance,
        })
    }

    /// Override fields from `LECTERN_*` environment variables.
    ///
    /// Invalid values are logged and skipped rather than failing startup.
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup("LECTERN_QUIET_PERIOD_MS") {
            match raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::Config(e.to_string()))
                .and_then(quiet_period_from_ms)
            {
                Ok(period) => self.controls_quiet_period = period,
                Err(e) => warn!("Ignoring LECTERN_QUIET_PERIOD_MS={}: {}", raw, e),
            }
        }
        if let Some(raw) = lookup("LECTERN_INITIAL_VOLUME") {
            match raw
                .trim()
                .parse::<f32>()
                .map_err(|e| ConfigError::Config(e.to_string()))
                .and_then(initial_volume)
            {
                Ok(volume) => self.initial_volume = volume,
                Err(e) => warn!("Ignoring LECTERN_INITIAL_VOLUME={}: {}", raw, e),
            }
        }
        if let Some(raw) = lookup("LECTERN_UNMUTE_VOLUME") {
            match parse_unmute_volume(&raw) {
                Ok(policy) => self.unmute_volume = policy,
                Err(e) => warn!("Ignoring LECTERN_UNMUTE_VOLUME={}: {}", raw, e),
            }
        }
        if let Some(raw) = lookup("LECTERN_AUTO_ADVANCE") {
            match parse_bool(&raw) {
                Some(enabled) => self.auto_advance = enabled,
                None => warn!("Ignoring LECTERN_AUTO_ADVANCE={}: expected true/false", raw),
            }
        }
        self
    }
}

fn quiet_period_from_ms(ms: u64) -> Result<Duration, ConfigError> {
    if ms == 0 {
        return Err(ConfigError::Config(
            "controls quiet period must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_millis(ms))
}

fn initial_volume(volume: f32) -> Result<f32, ConfigError> {
    if volume.is_nan() {
        return Err(ConfigError::Config("initial volume is not a number".to_string()));
    }
    let clamped = volume.clamp(0.0, 1.0);
    if clamped != volume {
        warn!("Initial volume {} clamped to {}", volume, clamped);
    }
    Ok(clamped)
}

fn fixed_unmute_volume(level: f32) -> Result<UnmuteVolume, ConfigError> {
    if !(level > 0.0 && level <= 1.0) {
        return Err(ConfigError::Config(format!(
            "unmute volume must be in (0, 1], got {}",
            level
        )));
    }
    Ok(UnmuteVolume::Fixed(level))
}

fn parse_unmute_volume(raw: &str) -> Result<UnmuteVolume, ConfigError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("remembered") {
        return Ok(UnmuteVolume::Remembered);
    }
    let level = raw.parse::<f32>().map_err(|_| {
        ConfigError::Config(format!(
            "unmute volume must be a level or \"remembered\", got {:?}",
            raw
        ))
    })?;
    fixed_unmute_volume(level)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
