//! Game configuration, loaded from JSON with every field optional.

use std::fs;
use std::path::{Path, PathBuf};

use jr_core::{BindingEntry, InputBindings};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub tick_rate: u32,
    pub starting_lives: i32,
    pub timer_seconds: u32,
    pub player_size: (i32, i32),
    pub enemy_size: (i32, i32),
    /// Optional RGBA sprite frames the pixel masks are derived from.
    pub player_mask_image: Option<PathBuf>,
    pub enemy_mask_image: Option<PathBuf>,
    pub level_manifest: PathBuf,
    pub high_score_file: PathBuf,
    /// Replaces the built-in binding table when present.
    pub bindings: Option<Vec<BindingEntry>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 640,
            tick_rate: 30,
            starting_lives: 3,
            timer_seconds: 50,
            player_size: (30, 44),
            enemy_size: (27, 34),
            player_mask_image: None,
            enemy_mask_image: None,
            level_manifest: PathBuf::from("assets/levels/levels.json"),
            high_score_file: PathBuf::from("high_score.txt"),
            bindings: None,
        }
    }
}

impl GameConfig {
    pub fn input_bindings(&self) -> InputBindings {
        match &self.bindings {
            Some(entries) => InputBindings::from_entries(entries.clone()),
            None => InputBindings::default(),
        }
    }

    pub fn timer_ticks(&self) -> u32 {
        self.timer_seconds * self.tick_rate
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: GameConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &GameConfig) -> Result<(), ConfigError> {
    if config.screen_width <= 0 || config.screen_height <= 0 {
        return Err(ConfigError::Invalid(
            "screen dimensions must be > 0".to_string(),
        ));
    }
    if config.tick_rate == 0 {
        return Err(ConfigError::Invalid("tick_rate must be > 0".to_string()));
    }
    let sizes = [config.player_size, config.enemy_size];
    if sizes.iter().any(|&(w, h)| w <= 0 || h <= 0) {
        return Err(ConfigError::Invalid("entity sizes must be > 0".to_string()));
    }
    Ok(())
}
