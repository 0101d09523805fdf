//! Pager pursuit AI
//!
//! Seek-with-jitter steering: each tick a pager steps straight at the player
//! and sometimes wobbles off course by a random-angle kick.

use glam::Vec2;
use rand::Rng;

use super::state::Pager;
use crate::consts::{JITTER_CHANCE, JITTER_FACTOR, PAGER_BASE_SPEED, PAGER_SPEED_GROWTH};
use crate::{jitter, seek};

/// Pager speed per tick at `level` (1-based): BASE * 1.2^(level - 1)
pub fn pager_speed(level: u32) -> f32 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    PAGER_BASE_SPEED * PAGER_SPEED_GROWTH.powi(exponent)
}

/// Upper bound on a single pager displacement at `level`
pub fn max_step(level: u32) -> f32 {
    pager_speed(level) * (1.0 + JITTER_FACTOR)
}

/// Displacement for one pager this tick
pub fn pursuit_step<R: Rng + ?Sized>(pager: Vec2, target: Vec2, speed: f32, rng: &mut R) -> Vec2 {
    let mut step = seek(pager, target, speed);
    if rng.random_bool(JITTER_CHANCE) {
        step += jitter(rng, speed * JITTER_FACTOR);
    }
    step
}

/// Move every pager toward `target`
pub fn advance_pagers<R: Rng + ?Sized>(pagers: &mut [Pager], target: Vec2, level: u32, rng: &mut R) {
    let speed = pager_speed(level);
    for pager in pagers.iter_mut() {
        pager.pos += pursuit_step(pager.pos, target, speed, rng);
    }
}
