//! Runtime configuration
//!
//! Loaded from an optional JSON file. Every field falls back to its default so
//! a partial file only overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Arena;

/// Default config file looked up by the binary
pub const DEFAULT_CONFIG_FILE: &str = "pagertron.json";

/// Default high score file
pub const DEFAULT_HIGH_SCORES_FILE: &str = "pagertron_highscores.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("tick period must be at least 1ms")]
    ZeroTick,
    #[error("tick period {tick_ms}ms exceeds {max}ms")]
    TickTooLong { tick_ms: u64, max: u64 },
    #[error("pagers_per_level must be at least 1")]
    EmptyBatch,
    #[error("arena {width}x{height} must have finite dimensions")]
    NonFiniteArena { width: f32, height: f32 },
    #[error("safe spawn distance {0} must be finite")]
    NonFiniteSafeDistance(f32),
    #[error("arena {width}x{height} cannot fit a {min}px entity")]
    ArenaTooSmall { width: f32, height: f32, min: f32 },
    #[error(
        "arena {width}x{height} has no spawn point {safe_distance}px from the player start \
         (farthest is {farthest:.1}px)"
    )]
    UnsafeSpawn {
        width: f32,
        height: f32,
        safe_distance: f32,
        farthest: f32,
    },
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Fixed tick period in milliseconds
    pub tick_ms: u64,
    pub pagers_per_level: u32,
    /// Minimum pager spawn distance from the player start
    pub safe_spawn_distance: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            tick_ms: TICK_MS,
            pagers_per_level: PAGERS_PER_LEVEL,
            safe_spawn_distance: SAFE_SPAWN_DISTANCE,
        }
    }
}

impl SimConfig {
    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Check the startup preconditions the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.tick_ms > MAX_TICK_MS {
            return Err(ConfigError::TickTooLong {
                tick_ms: self.tick_ms,
                max: MAX_TICK_MS,
            });
        }
        if self.pagers_per_level == 0 {
            return Err(ConfigError::EmptyBatch);
        }

        if !(self.arena_width.is_finite() && self.arena_height.is_finite()) {
            return Err(ConfigError::NonFiniteArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !self.safe_spawn_distance.is_finite() {
            return Err(ConfigError::NonFiniteSafeDistance(self.safe_spawn_distance));
        }

        let min = PLAYER_SIZE.max(PAGER_SIZE);
        if !(self.arena_width >= min && self.arena_height >= min) {
            return Err(ConfigError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
                min,
            });
        }

        let arena = self.arena();
        let start = arena.center();
        let farthest = arena.farthest_body_corner(start, PAGER_SIZE).distance(start);
        if farthest < self.safe_spawn_distance {
            return Err(ConfigError::UnsafeSpawn {
                width: self.arena_width,
                height: self.arena_height,
                safe_distance: self.safe_spawn_distance,
                farthest,
            });
        }

        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sim: SimConfig,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    pub high_scores_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            seed: None,
            high_scores_path: PathBuf::from(DEFAULT_HIGH_SCORES_FILE),
        }
    }
}

impl Config {
    /// Parse config JSON (does not validate)
    pub fn from_json(json: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json, path)?;
        config.sim.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load a config file, using validated defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::load(path);
        }

        log::info!("No config at {}, using defaults", path.display());
        let config = Self::default();
        config.sim.validate()?;
        Ok(config)
    }
}
