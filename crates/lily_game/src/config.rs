use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use lily_core::time::{DEFAULT_FRAME_RATE, DEFAULT_MIN_FRAME_RATE};

use crate::catalog::LEVEL_COUNT;

pub const CONFIG_PATH: &str = "assets/config/game.json";
const DEFAULT_LEVELS_DIR: &str = "assets/levels";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Catalog index to start from, for jumping straight to one level.
    #[serde(default)]
    pub start_level: usize,
    #[serde(default = "default_levels_dir")]
    pub levels_dir: PathBuf,
    /// A user-made level read with the custom token table instead of the
    /// catalog.
    #[serde(default)]
    pub custom_level: Option<PathBuf>,
    /// Fixed seed for reproducible runs; the wall clock otherwise.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u64,
    /// Frames slower than this rate are clamped to its frame time.
    #[serde(default = "default_min_frame_rate")]
    pub min_frame_rate: u64,
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_level: 0,
            levels_dir: default_levels_dir(),
            custom_level: None,
            rng_seed: None,
            frame_rate: default_frame_rate(),
            min_frame_rate: default_min_frame_rate(),
            sound_enabled: default_sound_enabled(),
        }
    }
}

impl GameConfig {
    pub fn seed(&self) -> u64 {
        self.rng_seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

/// Load and validate the config. A missing file yields the defaults.
pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return Ok(GameConfig::default());
    }
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.frame_rate == 0 {
        return Err("Config validation failed: frame_rate must be > 0".to_string());
    }
    if config.min_frame_rate == 0 {
        return Err("Config validation failed: min_frame_rate must be > 0".to_string());
    }
    if config.min_frame_rate > config.frame_rate {
        return Err(format!(
            "Config validation failed: min_frame_rate {} exceeds frame_rate {}",
            config.min_frame_rate, config.frame_rate
        ));
    }
    if config.start_level >= LEVEL_COUNT {
        return Err(format!(
            "Config validation failed: start_level {} out of range (0..{})",
            config.start_level, LEVEL_COUNT
        ));
    }
    Ok(())
}

fn default_levels_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LEVELS_DIR)
}

const fn default_frame_rate() -> u64 {
    DEFAULT_FRAME_RATE
}

const fn default_min_frame_rate() -> u64 {
    DEFAULT_MIN_FRAME_RATE
}

const fn default_sound_enabled() -> bool {
    true
}
