//! Defeat finale cascade
//!
//! On defeat a volley of missiles leaves the arena center: one toward every
//! surviving pager and one toward each cell of a 16x16 grid, so the whole
//! screen is swept whatever the pager count. Missiles that leave the arena
//! burst into short-lived explosions. Purely cosmetic; it never decides the
//! outcome of a round.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use crate::consts::*;

/// Finale projectile with a free unit direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinaleMissile {
    pub pos: Vec2,
    /// Unit direction
    pub dir: Vec2,
}

impl FinaleMissile {
    /// Missile leaving `origin` toward `target`; straight up if they coincide
    pub fn aimed(origin: Vec2, target: Vec2) -> Self {
        let dir = (target - origin).try_normalize().unwrap_or(Vec2::NEG_Y);
        Self { pos: origin, dir }
    }

    pub fn advance(&mut self) {
        self.pos += self.dir * FINALE_MISSILE_SPEED;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub size: f32,
    /// Simulation time the explosion appeared
    pub created_ms: u64,
}

impl Explosion {
    pub fn age(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_ms)
    }

    pub fn expired(&self, now_ms: u64) -> bool {
        self.age(now_ms) > EXPLOSION_LIFETIME_MS
    }
}

/// Finale missiles and the explosions they leave behind
#[derive(Debug, Clone, Default)]
pub struct Finale {
    pub missiles: Vec<FinaleMissile>,
    pub explosions: Vec<Explosion>,
}

impl Finale {
    /// Build the volley from the pagers' last positions
    pub fn launch(pager_positions: &[Vec2], arena: &Arena) -> Self {
        let origin = arena.center();
        let missiles: Vec<FinaleMissile> = pager_positions
            .iter()
            .copied()
            .chain(grid_targets(arena))
            .map(|target| FinaleMissile::aimed(origin, target))
            .collect();

        log::info!(
            "Finale launched: {} missiles ({} pagers)",
            missiles.len(),
            pager_positions.len()
        );

        Self {
            missiles,
            explosions: Vec::new(),
        }
    }

    /// Advance one tick at simulation time `now_ms`
    pub fn advance<R: Rng + ?Sized>(&mut self, now_ms: u64, arena: &Arena, rng: &mut R) {
        for missile in &mut self.missiles {
            missile.advance();
        }

        let mut exits = Vec::new();
        self.missiles.retain(|m| {
            if arena.contains_inclusive(m.pos) {
                true
            } else {
                exits.push(arena.clamp_point(m.pos));
                false
            }
        });

        for exit in exits {
            self.burst(exit, now_ms, arena, rng);
        }

        self.explosions.retain(|e| !e.expired(now_ms));
    }

    /// 2-3 explosions around the exit point, sometimes one more anywhere
    fn burst<R: Rng + ?Sized>(&mut self, exit: Vec2, now_ms: u64, arena: &Arena, rng: &mut R) {
        let count = rng.random_range(2..=3);
        for _ in 0..count {
            let offset = Vec2::new(
                rng.random_range(-EXPLOSION_SCATTER..=EXPLOSION_SCATTER),
                rng.random_range(-EXPLOSION_SCATTER..=EXPLOSION_SCATTER),
            );
            self.explosions.push(Explosion {
                pos: exit + offset,
                size: rng.random_range(EXPLOSION_MIN_SIZE..EXPLOSION_MAX_SIZE),
                created_ms: now_ms,
            });
        }

        if rng.random_bool(BONUS_EXPLOSION_CHANCE) {
            let pos = Vec2::new(
                rng.random_range(0.0..arena.width),
                rng.random_range(0.0..arena.height),
            );
            self.explosions.push(Explosion {
                pos,
                size: rng.random_range(EXPLOSION_MIN_SIZE..EXPLOSION_MAX_SIZE),
                created_ms: now_ms,
            });
        }
    }

    /// Nothing left in flight or on screen
    pub fn is_finished(&self) -> bool {
        self.missiles.is_empty() && self.explosions.is_empty()
    }

    pub fn clear(&mut self) {
        self.missiles.clear();
        self.explosions.clear();
    }
}

/// Centers of a FINALE_GRID x FINALE_GRID grid over the arena
pub fn grid_targets(arena: &Arena) -> impl Iterator<Item = Vec2> {
    let cell = Vec2::new(
        arena.width / FINALE_GRID as f32,
        arena.height / FINALE_GRID as f32,
    );
    (0..FINALE_GRID).flat_map(move |row| {
        (0..FINALE_GRID).map(move |col| {
            Vec2::new((col as f32 + 0.5) * cell.x, (row as f32 + 0.5) * cell.y)
        })
    })
}
