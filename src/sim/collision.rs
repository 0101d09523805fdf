//! Collision detection and scoring
//!
//! Missiles against pagers, and pagers against the player. All bodies are
//! compared center to center.

use glam::Vec2;

use super::state::{Missile, Pager};
use crate::consts::{COLLISION_RADIUS, PAGER_SIZE};

/// Result of resolving missile hits for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitReport {
    /// Ids of destroyed pagers, in pager order
    pub destroyed: Vec<u32>,
}

impl HitReport {
    pub fn count(&self) -> u32 {
        self.destroyed.len() as u32
    }
}

/// Whether a missile of `missile_size` overlaps a pager
#[inline]
pub fn missile_hits_pager(missile: Vec2, pager: Vec2, missile_size: f32) -> bool {
    missile.distance(pager) < (PAGER_SIZE + missile_size) / 2.0
}

/// Remove every pager struck by a missile together with that missile.
///
/// Pagers are visited in order and each claims the first live missile in
/// range, so a missile kills at most one pager.
pub fn resolve_missile_hits(
    pagers: &mut Vec<Pager>,
    missiles: &mut Vec<Missile>,
    missile_size: f32,
) -> HitReport {
    let mut report = HitReport::default();
    if missiles.is_empty() {
        return report;
    }

    pagers.retain(|pager| {
        let hit = missiles
            .iter()
            .position(|m| missile_hits_pager(m.pos, pager.pos, missile_size));
        match hit {
            Some(index) => {
                missiles.remove(index);
                report.destroyed.push(pager.id);
                false
            }
            None => true,
        }
    });

    report
}

/// Whether any pager has reached the player (player treated as a point)
pub fn player_caught(player: Vec2, pagers: &[Pager]) -> bool {
    pagers
        .iter()
        .any(|pager| player.distance(pager.pos) < COLLISION_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Direction;

    fn pager(id: u32, x: f32, y: f32) -> Pager {
        Pager {
            id,
            pos: Vec2::new(x, y),
        }
    }

    fn missile(x: f32, y: f32) -> Missile {
        Missile {
            pos: Vec2::new(x, y),
            direction: Direction::Up,
        }
    }

    #[test]
    fn test_hit_threshold() {
        // (50 + 15) / 2 = 32.5
        assert!(missile_hits_pager(Vec2::new(0.0, 32.0), Vec2::ZERO, 15.0));
        assert!(!missile_hits_pager(Vec2::new(0.0, 32.5), Vec2::ZERO, 15.0));
        // (50 + 75) / 2 = 62.5 with cheat sized missiles
        assert!(missile_hits_pager(Vec2::new(0.0, 60.0), Vec2::ZERO, 75.0));
    }

    #[test]
    fn test_hit_removes_pager_and_missile() {
        let mut pagers = vec![pager(1, 100.0, 100.0), pager(2, 500.0, 500.0)];
        let mut missiles = vec![missile(105.0, 110.0), missile(900.0, 50.0)];
        let report = resolve_missile_hits(&mut pagers, &mut missiles, 15.0);
        assert_eq!(report.destroyed, vec![1]);
        assert_eq!(pagers.len(), 1);
        assert_eq!(pagers[0].id, 2);
        assert_eq!(missiles.len(), 1);
        assert_eq!(missiles[0].pos, Vec2::new(900.0, 50.0));
    }

    #[test]
    fn test_one_missile_kills_one_pager() {
        // Two overlapping pagers, one missile: the first pager takes it
        let mut pagers = vec![pager(1, 100.0, 100.0), pager(2, 110.0, 100.0)];
        let mut missiles = vec![missile(105.0, 100.0)];
        let report = resolve_missile_hits(&mut pagers, &mut missiles, 15.0);
        assert_eq!(report.destroyed, vec![1]);
        assert_eq!(pagers.len(), 1);
        assert_eq!(pagers[0].id, 2);
        assert!(missiles.is_empty());
    }

    #[test]
    fn test_pager_claims_first_missile_in_list_order() {
        let mut pagers = vec![pager(1, 100.0, 100.0), pager(2, 130.0, 100.0)];
        // Both missiles are in range of both pagers
        let mut missiles = vec![missile(115.0, 100.0), missile(116.0, 100.0)];
        let report = resolve_missile_hits(&mut pagers, &mut missiles, 15.0);
        assert_eq!(report.destroyed, vec![1, 2]);
        assert!(pagers.is_empty());
        assert!(missiles.is_empty());
    }

    #[test]
    fn test_player_caught_radius() {
        let player = Vec2::new(640.0, 360.0);
        assert!(player_caught(player, &[pager(1, 655.0, 360.0)]));
        assert!(!player_caught(player, &[pager(1, 660.0, 360.0)]));
        assert!(!player_caught(player, &[]));
    }
}
