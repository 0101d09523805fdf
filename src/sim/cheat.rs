//! Secret input sequence detector
//!
//! Keeps a sliding window of the last arrow keys and fires when the window
//! equals the code exactly.

use std::collections::VecDeque;

use super::state::Direction;

/// Up, Up, Down, Down, Left, Right, Left, Right
pub const CHEAT_SEQUENCE: [Direction; 8] = [
    Direction::Up,
    Direction::Up,
    Direction::Down,
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::Left,
    Direction::Right,
];

#[derive(Debug, Clone, Default)]
pub struct CheatDetector {
    history: VecDeque<Direction>,
}

impl CheatDetector {
    /// Record a key; returns true when the sequence just completed.
    ///
    /// A match clears the history, a miss keeps it for overlapping attempts.
    pub fn push(&mut self, key: Direction) -> bool {
        self.history.push_back(key);
        if self.history.len() > CHEAT_SEQUENCE.len() {
            self.history.pop_front();
        }

        if self.history.iter().eq(CHEAT_SEQUENCE.iter()) {
            self.history.clear();
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn feed(detector: &mut CheatDetector, keys: &[Direction]) -> bool {
        keys.iter().fold(false, |hit, &k| detector.push(k) || hit)
    }

    #[test]
    fn test_exact_sequence_matches_and_clears() {
        let mut detector = CheatDetector::default();
        assert!(feed(&mut detector, &CHEAT_SEQUENCE));
        assert!(detector.is_empty());
    }

    #[test]
    fn test_single_position_change_never_matches() {
        let alternatives = [Up, Down, Left, Right];
        for i in 0..CHEAT_SEQUENCE.len() {
            for &alt in alternatives.iter().filter(|&&d| d != CHEAT_SEQUENCE[i]) {
                let mut keys = CHEAT_SEQUENCE;
                keys[i] = alt;
                let mut detector = CheatDetector::default();
                assert!(!feed(&mut detector, &keys), "matched with {:?} at {}", alt, i);
                assert_eq!(detector.len(), CHEAT_SEQUENCE.len());
            }
        }
    }

    #[test]
    fn test_window_slides_past_noise() {
        let mut detector = CheatDetector::default();
        assert!(!feed(&mut detector, &[Left, Left, Right]));
        assert!(feed(&mut detector, &CHEAT_SEQUENCE));
    }

    #[test]
    fn test_history_is_capped() {
        let mut detector = CheatDetector::default();
        feed(&mut detector, &[Down; 20]);
        assert_eq!(detector.len(), CHEAT_SEQUENCE.len());
    }
}
