//! Pagertron - an arcade shooter where pagers pursue the player
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pursuit, collisions, phases, finale)
//! - `runner`: Single-writer game loop task fed by a command queue
//! - `config`: Runtime configuration with validation
//! - `highscores`: Top-10 leaderboard fed by score records
//! - `audio`: Music track selection driven by phase events

pub mod audio;
pub mod config;
pub mod highscores;
pub mod runner;
pub mod sim;

pub use audio::{MusicDirector, MusicTrack};
pub use config::{Config, ConfigError, SimConfig};
pub use highscores::HighScores;
pub use runner::{GameHandle, spawn_game};

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Default fixed simulation period (20 Hz)
    pub const TICK_MS: u64 = 50;
    /// Longest accepted tick period
    pub const MAX_TICK_MS: u64 = 60_000;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Entity sizes (bodies are squares centred on their position)
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PAGER_SIZE: f32 = 50.0;
    pub const MISSILE_SIZE: f32 = 15.0;
    /// Missile size multiplier while cheat mode is active (15 -> 75)
    pub const CHEAT_MISSILE_SCALE: f32 = 5.0;

    /// Player movement per move command
    pub const PLAYER_STEP: f32 = 8.0;
    /// Missile travel per tick
    pub const MISSILE_SPEED: f32 = 8.0;
    /// Player/pager contact distance (player is treated as a point)
    pub const COLLISION_RADIUS: f32 = 20.0;

    /// Pager batches
    pub const PAGERS_PER_LEVEL: u32 = 7;
    pub const SAFE_SPAWN_DISTANCE: f32 = 200.0;
    /// Rejection-sampling budget before falling back to the farthest corner
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;

    /// Pursuit: speed = BASE * GROWTH^(level - 1)
    pub const PAGER_BASE_SPEED: f32 = 1.0;
    pub const PAGER_SPEED_GROWTH: f32 = 1.2;
    pub const JITTER_CHANCE: f64 = 0.2;
    /// Jitter magnitude as a fraction of the current pager speed
    pub const JITTER_FACTOR: f32 = 0.5;

    pub const POINTS_PER_PAGER: u64 = 10;

    /// Phase timers
    pub const TRANSITION_DURATION_MS: u64 = 2000;
    pub const GAME_OVER_DELAY_MS: u64 = 1000;
    pub const FINALE_DURATION_MS: u64 = 2500;
    pub const CHEAT_BANNER_MS: u64 = 2000;

    /// Finale cascade
    pub const FINALE_MISSILE_SPEED: f32 = 20.0;
    /// Grid targets per axis (16x16 volley)
    pub const FINALE_GRID: u32 = 16;
    pub const EXPLOSION_LIFETIME_MS: u64 = 700;
    pub const BONUS_EXPLOSION_CHANCE: f64 = 0.3;
    pub const EXPLOSION_MIN_SIZE: f32 = 30.0;
    pub const EXPLOSION_MAX_SIZE: f32 = 70.0;
    /// Max offset of an exit explosion from the exit point
    pub const EXPLOSION_SCATTER: f32 = 25.0;
}

/// Step of length `speed` from `from` toward `to`.
///
/// Zero distance means no movement rather than a NaN direction.
#[inline]
pub fn seek(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let delta = to - from;
    let len = delta.length();
    if len > 0.0 { delta / len * speed } else { Vec2::ZERO }
}

/// Unit vector pointing at `angle` radians
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Random-angle vector of the given magnitude
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, magnitude: f32) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    unit_from_angle(angle) * magnitude
}
