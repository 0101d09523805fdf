//! Phase transitions
//!
//! Every wholesale change to score, level or entity sets happens here, inside
//! one of the legal transitions enumerated by `GamePhase::can_transition_to`.
//! Timed transitions are deadlines stored on the state and checked once per
//! tick; a phase change discards them.

use super::finale::Finale;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Menu -> Playing. The state is already fresh, nothing is reset.
pub fn start(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Menu {
        return false;
    }
    state.set_phase(GamePhase::Playing)
}

/// Playing -> GameOver, with the finale scheduled
pub fn player_caught(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    state.set_phase_with_deadline(GamePhase::GameOver, GAME_OVER_DELAY_MS)
}

/// Playing -> LevelTransition. Entities freeze and missiles are dropped.
pub fn level_cleared(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    state.missiles.clear();
    log::info!("Level {} cleared", state.level);
    state.set_phase_with_deadline(GamePhase::LevelTransition, TRANSITION_DURATION_MS)
}

/// LevelTransition -> Playing on the next level with a fresh batch
pub fn next_level(state: &mut GameState) -> bool {
    if state.phase != GamePhase::LevelTransition {
        return false;
    }
    state.level += 1;
    state.missiles.clear();
    state.respawn_pagers();
    log::info!(
        "Level {} starting with {} pagers",
        state.level,
        state.pagers.len()
    );
    state.set_phase(GamePhase::Playing)
}

/// GameOver -> Finale. Surviving pagers become finale targets.
pub fn begin_finale(state: &mut GameState) -> bool {
    if state.phase != GamePhase::GameOver {
        return false;
    }
    state.missiles.clear();
    let targets: Vec<_> = state.pagers.drain(..).map(|p| p.pos).collect();
    state.finale = Finale::launch(&targets, &state.arena);
    state.set_phase_with_deadline(GamePhase::Finale, FINALE_DURATION_MS)
}

/// Finale -> Summary, handing the result to the high score store
pub fn finish_finale(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Finale {
        return false;
    }
    state.finale.clear();
    let (score, level) = (state.score, state.level);
    if !state.set_phase(GamePhase::Summary) {
        return false;
    }
    log::info!("Final score {} on level {}", score, level);
    state.push_event(GameEvent::ScoreRecorded { score, level });
    true
}

/// Summary -> Menu, restoring every piece of round state
pub fn play_again(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Summary {
        return false;
    }
    state.reset_round();
    state.set_phase(GamePhase::Menu)
}

/// Fire the current phase's timed transition if its deadline has passed
pub fn expire_deadline(state: &mut GameState) {
    if !state.deadline_reached() {
        return;
    }
    match state.phase {
        GamePhase::LevelTransition => {
            next_level(state);
        }
        GamePhase::GameOver => {
            begin_finale(state);
        }
        GamePhase::Finale => {
            finish_finale(state);
        }
        GamePhase::Menu | GamePhase::Playing | GamePhase::Summary => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::state::Pager;
    use glam::Vec2;

    fn playing_state() -> GameState {
        let mut state = GameState::new(SimConfig::default(), 77).unwrap();
        assert!(start(&mut state));
        state.drain_events();
        state
    }

    #[test]
    fn test_transitions_guard_their_source_phase() {
        let mut state = GameState::new(SimConfig::default(), 1).unwrap();
        assert!(!player_caught(&mut state));
        assert!(!level_cleared(&mut state));
        assert!(!next_level(&mut state));
        assert!(!begin_finale(&mut state));
        assert!(!finish_finale(&mut state));
        assert!(!play_again(&mut state));
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(start(&mut state));
        assert!(!start(&mut state));
    }

    #[test]
    fn test_begin_finale_consumes_pagers() {
        let mut state = playing_state();
        state.pagers = vec![
            Pager { id: 1, pos: Vec2::new(10.0, 10.0) },
            Pager { id: 2, pos: Vec2::new(20.0, 10.0) },
            Pager { id: 3, pos: Vec2::new(30.0, 10.0) },
        ];
        assert!(player_caught(&mut state));
        assert!(begin_finale(&mut state));
        assert!(state.pagers.is_empty());
        assert!(state.missiles.is_empty());
        assert_eq!(
            state.finale.missiles.len(),
            3 + (FINALE_GRID * FINALE_GRID) as usize
        );
    }

    #[test]
    fn test_finish_finale_records_score_once() {
        let mut state = playing_state();
        state.score = 120;
        state.level = 3;
        player_caught(&mut state);
        begin_finale(&mut state);
        state.drain_events();

        assert!(finish_finale(&mut state));
        assert!(!finish_finale(&mut state));
        let events = state.drain_events();
        let records: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ScoreRecorded { .. }))
            .collect();
        assert_eq!(records, vec![&GameEvent::ScoreRecorded { score: 120, level: 3 }]);
        assert!(state.finale.is_finished());
    }

    #[test]
    fn test_next_level_respawns_and_increments() {
        let mut state = playing_state();
        state.pagers.clear();
        assert!(level_cleared(&mut state));
        assert!(next_level(&mut state));
        assert_eq!(state.level, 2);
        assert_eq!(state.pagers.len(), PAGERS_PER_LEVEL as usize);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
