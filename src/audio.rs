//! Music selection
//!
//! Decides which background track should be playing from the phase events the
//! game emits. Playback itself belongs to whatever frontend owns the speakers.

use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, GamePhase};

/// Background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicTrack {
    /// Title screen and post-defeat loop
    Intro,
    /// In-game loop
    Gameplay,
}

impl MusicTrack {
    pub fn as_str(&self) -> &'static str {
        match self {
            MusicTrack::Intro => "intro",
            MusicTrack::Gameplay => "gameplay",
        }
    }
}

/// Music manager for the game
#[derive(Debug, Clone)]
pub struct MusicDirector {
    track: MusicTrack,
    muted: bool,
}

impl Default for MusicDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicDirector {
    /// Starts on the intro track, as the game starts in the menu
    pub fn new() -> Self {
        Self {
            track: MusicTrack::Intro,
            muted: false,
        }
    }

    /// Track that should be audible right now
    pub fn current(&self) -> Option<MusicTrack> {
        if self.muted { None } else { Some(self.track) }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Mute/unmute; the selection survives a mute
    pub fn set_muted(&mut self, muted: bool) -> Option<MusicTrack> {
        self.muted = muted;
        self.current()
    }

    /// Feed a game event; returns the new audible track when it changed
    pub fn on_event(&mut self, event: &GameEvent) -> Option<MusicTrack> {
        let GameEvent::PhaseChanged { from, to } = *event else {
            return None;
        };

        let next = match (from, to) {
            (GamePhase::Menu, GamePhase::Playing) => MusicTrack::Gameplay,
            (_, GamePhase::GameOver) | (_, GamePhase::Menu) => MusicTrack::Intro,
            // Level transitions keep the current loop
            _ => self.track,
        };

        if next == self.track {
            return None;
        }
        log::debug!("Music {} -> {}", self.track.as_str(), next.as_str());
        self.track = next;
        self.current()
    }
}
