//! Pager batch generation
//!
//! Pagers are placed uniformly over the arena by rejection sampling, keeping
//! every body inside the bounds and at least the safe distance away from the
//! player start.

use glam::Vec2;
use rand::Rng;

use super::arena::Arena;
use super::state::Pager;
use crate::consts::{MAX_SPAWN_ATTEMPTS, PAGER_SIZE};

/// Generate `count` pagers with ids `1..=count`.
///
/// The config validation guarantees a point at the safe distance exists; if
/// sampling still runs out of attempts the farthest corner is used.
pub fn spawn_batch<R: Rng + ?Sized>(
    count: u32,
    arena: &Arena,
    start: Vec2,
    safe_distance: f32,
    rng: &mut R,
) -> Vec<Pager> {
    let half = PAGER_SIZE / 2.0;
    let (min, max) = (
        Vec2::splat(half),
        Vec2::new(arena.width - half, arena.height - half),
    );

    let mut pagers = Vec::with_capacity(count as usize);
    for id in 1..=count {
        let mut pos = None;
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let candidate = Vec2::new(
                sample_axis(rng, min.x, max.x),
                sample_axis(rng, min.y, max.y),
            );
            if candidate.distance(start) >= safe_distance {
                pos = Some(candidate);
                break;
            }
        }
        let pos = pos.unwrap_or_else(|| {
            log::warn!("Pager {} spawn sampling exhausted, using farthest corner", id);
            arena.farthest_body_corner(start, PAGER_SIZE)
        });
        pagers.push(Pager { id, pos });
    }

    log::debug!("Spawned {} pagers", pagers.len());
    pagers
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_batch_respects_safe_distance_and_bounds() {
        let arena = Arena::default();
        let start = arena.center();
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let pagers = spawn_batch(7, &arena, start, 200.0, &mut rng);
            assert_eq!(pagers.len(), 7);
            for (i, pager) in pagers.iter().enumerate() {
                assert_eq!(pager.id, i as u32 + 1);
                assert!(pager.pos.distance(start) >= 200.0);
                assert!(pager.pos.x >= 25.0 && pager.pos.x <= 1255.0);
                assert!(pager.pos.y >= 25.0 && pager.pos.y <= 695.0);
            }
        }
    }

    #[test]
    fn test_batch_is_deterministic_per_seed() {
        let arena = Arena::default();
        let a = spawn_batch(7, &arena, arena.center(), 200.0, &mut Pcg32::seed_from_u64(9));
        let b = spawn_batch(7, &arena, arena.center(), 200.0, &mut Pcg32::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_unreachable_distance_falls_back_to_corner() {
        let arena = Arena::new(300.0, 300.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let pagers = spawn_batch(2, &arena, arena.center(), 10_000.0, &mut rng);
        assert_eq!(pagers[0].pos, arena.farthest_body_corner(arena.center(), PAGER_SIZE));
    }
}
