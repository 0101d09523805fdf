//! External commands
//!
//! The only way anything outside the simulation changes it. Commands are
//! applied between ticks; ones that make no sense in the current phase are
//! dropped.

use serde::{Deserialize, Serialize};

use super::phase;
use super::state::{Direction, GameEvent, GameState, Missile};

/// Raw key as seen by the sequence detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Arrow(Direction),
    Space,
    Other(String),
}

impl Key {
    /// Parse a key name (`up`, `down`, `left`, `right`, `space`)
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "up" | "arrowup" => Key::Arrow(Direction::Up),
            "down" | "arrowdown" => Key::Arrow(Direction::Down),
            "left" | "arrowleft" => Key::Arrow(Direction::Left),
            "right" | "arrowright" => Key::Arrow(Direction::Right),
            "space" => Key::Space,
            other => Key::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Menu -> Playing
    Start,
    Move(Direction),
    Fire,
    /// Every key press, regardless of phase
    Keystroke(Key),
    /// Summary -> Menu with a fresh round
    Reset,
}

/// Apply one command. Returns whether it changed anything.
pub fn apply_command(state: &mut GameState, command: Command) -> bool {
    let applied = match &command {
        Command::Start => phase::start(state),
        Command::Move(direction) => {
            if state.phase.accepts_player_input() {
                state.player.step(*direction, &state.arena);
                true
            } else {
                false
            }
        }
        Command::Fire => {
            if state.phase.accepts_player_input() {
                state.missiles.push(Missile {
                    pos: state.player.pos,
                    direction: state.player.facing,
                });
                true
            } else {
                false
            }
        }
        Command::Keystroke(key) => {
            keystroke(state, key);
            true
        }
        Command::Reset => phase::play_again(state),
    };

    if !applied {
        log::debug!("Ignored {:?} in {:?}", command, state.phase);
    }
    applied
}

fn keystroke(state: &mut GameState, key: &Key) {
    let Key::Arrow(direction) = key else {
        return;
    };
    if state.cheat.push(*direction) {
        // Re-entering the code while active only refreshes the banner
        if !state.cheat_mode {
            log::info!("Cheat mode activated");
        }
        state.cheat_mode = true;
        state.show_cheat_banner();
        state.push_event(GameEvent::CheatActivated);
    }
}

/// Commands an arcade cabinet issues for one key press
pub fn commands_for_key(key: &Key) -> Vec<Command> {
    match key {
        Key::Arrow(direction) => vec![Command::Keystroke(key.clone()), Command::Move(*direction)],
        // Fire while playing, start from the menu
        Key::Space => vec![
            Command::Keystroke(Key::Space),
            Command::Fire,
            Command::Start,
        ],
        Key::Other(_) => vec![Command::Keystroke(key.clone())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::consts::*;
    use crate::sim::cheat::CHEAT_SEQUENCE;
    use crate::sim::state::GamePhase;
    use glam::Vec2;

    fn new_state() -> GameState {
        GameState::new(SimConfig::default(), 2024).unwrap()
    }

    fn press(state: &mut GameState, key: Key) {
        for cmd in commands_for_key(&key) {
            apply_command(state, cmd);
        }
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("Up"), Key::Arrow(Direction::Up));
        assert_eq!(Key::from_name("ArrowLeft"), Key::Arrow(Direction::Left));
        assert_eq!(Key::from_name(" space\n"), Key::Space);
        assert_eq!(Key::from_name("q"), Key::Other("q".to_string()));
    }

    #[test]
    fn test_move_and_fire_only_while_playing() {
        let mut state = new_state();
        let start = state.player.pos;
        assert!(!apply_command(&mut state, Command::Move(Direction::Right)));
        assert!(!apply_command(&mut state, Command::Fire));
        assert_eq!(state.player.pos, start);
        assert!(state.missiles.is_empty());

        assert!(apply_command(&mut state, Command::Start));
        assert!(apply_command(&mut state, Command::Move(Direction::Right)));
        assert_eq!(state.player.pos, start + Vec2::new(PLAYER_STEP, 0.0));
        assert!(apply_command(&mut state, Command::Fire));
        assert_eq!(
            state.missiles,
            vec![Missile {
                pos: state.player.pos,
                direction: Direction::Right,
            }]
        );
    }

    #[test]
    fn test_space_starts_then_fires() {
        let mut state = new_state();
        press(&mut state, Key::Space);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.missiles.is_empty());

        press(&mut state, Key::Space);
        assert_eq!(state.missiles.len(), 1);
        assert_eq!(state.missiles[0].direction, Direction::Up);
    }

    #[test]
    fn test_reset_only_from_summary() {
        let mut state = new_state();
        assert!(!apply_command(&mut state, Command::Reset));
        apply_command(&mut state, Command::Start);
        assert!(!apply_command(&mut state, Command::Reset));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_cheat_code_in_menu() {
        let mut state = new_state();
        for &dir in &CHEAT_SEQUENCE {
            apply_command(&mut state, Command::Keystroke(Key::Arrow(dir)));
        }
        assert!(state.cheat_mode);
        assert!(state.cheat_banner_visible());
        assert_eq!(state.drain_events(), vec![GameEvent::CheatActivated]);
        assert_eq!(state.effective_missile_size(), MISSILE_SIZE * CHEAT_MISSILE_SCALE);
    }

    #[test]
    fn test_cheat_code_interrupted_by_other_keys() {
        let mut state = new_state();
        for (i, &dir) in CHEAT_SEQUENCE.iter().enumerate() {
            if i == 4 {
                apply_command(&mut state, Command::Keystroke(Key::Arrow(Direction::Up)));
            }
            apply_command(&mut state, Command::Keystroke(Key::Arrow(dir)));
        }
        assert!(!state.cheat_mode);
    }

    #[test]
    fn test_non_arrow_keys_skip_detector() {
        let mut state = new_state();
        for (i, &dir) in CHEAT_SEQUENCE.iter().enumerate() {
            if i == 4 {
                apply_command(&mut state, Command::Keystroke(Key::Space));
                apply_command(&mut state, Command::Keystroke(Key::Other("x".into())));
            }
            apply_command(&mut state, Command::Keystroke(Key::Arrow(dir)));
        }
        assert!(state.cheat_mode);
    }

    #[test]
    fn test_cheat_banner_expires() {
        let mut state = new_state();
        for &dir in &CHEAT_SEQUENCE {
            apply_command(&mut state, Command::Keystroke(Key::Arrow(dir)));
        }
        state.time_ms += CHEAT_BANNER_MS;
        assert!(!state.cheat_banner_visible());
        assert!(state.cheat_mode);
    }

    #[test]
    fn test_full_round_reset_restores_initial_values() {
        let mut state = new_state();
        for &dir in &CHEAT_SEQUENCE {
            press(&mut state, Key::Arrow(dir));
        }
        press(&mut state, Key::Space);
        assert_eq!(state.phase, GamePhase::Playing);
        press(&mut state, Key::Space);
        state.score = 30;
        state.level = 4;

        assert!(phase::player_caught(&mut state));
        assert!(phase::begin_finale(&mut state));
        assert!(phase::finish_finale(&mut state));
        assert!(apply_command(&mut state, Command::Reset));

        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(!state.cheat_mode);
        assert!(state.cheat.is_empty());
        assert!(state.missiles.is_empty());
        assert!(state.finale.is_finished());
        assert_eq!(state.pagers.len(), PAGERS_PER_LEVEL as usize);
        assert_eq!(state.player.pos, state.arena.center());
        assert_eq!(state.phase_deadline(), None);
    }
}
