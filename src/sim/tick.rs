//! Fixed timestep simulation tick
//!
//! Advances the simulated clock by one period and runs the work of the
//! current phase:
//!
//! - Playing: missiles, pursuit, missile hits, player contact, level clear
//! - Finale: the missile/explosion cascade
//! - Menu, LevelTransition, GameOver, Summary: nothing but the clock
//!
//! Timed transitions are evaluated last, against the advanced clock.

use super::collision::{player_caught, resolve_missile_hits};
use super::phase;
use super::pursuit::advance_pagers;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::POINTS_PER_PAGER;

/// Advance the game state by one fixed period
pub fn tick(state: &mut GameState) {
    state.tick_count += 1;
    state.time_ms += state.config.tick_ms;

    match state.phase {
        GamePhase::Playing => step_playing(state),
        GamePhase::Finale => {
            let now = state.time_ms;
            state.finale.advance(now, &state.arena, &mut state.rng);
        }
        GamePhase::Menu
        | GamePhase::LevelTransition
        | GamePhase::GameOver
        | GamePhase::Summary => {}
    }

    phase::expire_deadline(state);
}

fn step_playing(state: &mut GameState) {
    // Missiles fly first and vanish once they leave the arena
    let arena = state.arena;
    for missile in &mut state.missiles {
        missile.advance();
    }
    state.missiles.retain(|m| arena.contains(m.pos));

    let target = state.player.pos;
    advance_pagers(&mut state.pagers, target, state.level, &mut state.rng);

    let missile_size = state.effective_missile_size();
    let hits = resolve_missile_hits(&mut state.pagers, &mut state.missiles, missile_size);
    let destroyed = hits.count();
    if destroyed > 0 {
        state.score += POINTS_PER_PAGER * u64::from(destroyed);
        log::debug!("Destroyed pagers {:?}, score {}", hits.destroyed, state.score);
        state.push_event(GameEvent::PagersDestroyed {
            count: destroyed,
            score: state.score,
        });
    }

    // Contact uses post-movement positions of the survivors
    if player_caught(state.player.pos, &state.pagers) {
        phase::player_caught(state);
        return;
    }

    if state.pagers.is_empty() {
        phase::level_cleared(state);
    }
}
