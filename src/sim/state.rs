//! Game state and core simulation types
//!
//! The whole round lives in one `GameState` value. Only the tick and the
//! command handlers mutate it; observers get a `Snapshot`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::cheat::CheatDetector;
use super::finale::{Explosion, Finale, FinaleMissile};
use super::spawn::spawn_batch;
use crate::config::{ConfigError, SimConfig};
use crate::consts::*;

/// Cardinal direction (screen space, +Y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in screen space
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Active gameplay
    Playing,
    /// Between-level pause after a clear
    LevelTransition,
    /// Player was caught; finale pending
    GameOver,
    /// Defeat cascade of missiles and explosions
    Finale,
    /// Final score screen, waiting for play again
    Summary,
}

impl GamePhase {
    /// Enumerated legal transitions; everything else is rejected
    pub fn can_transition_to(self, next: GamePhase) -> bool {
        use GamePhase::*;
        matches!(
            (self, next),
            (Menu, Playing)
                | (Playing, GameOver)
                | (Playing, LevelTransition)
                | (LevelTransition, Playing)
                | (GameOver, Finale)
                | (Finale, Summary)
                | (Summary, Menu)
        )
    }

    /// Phases in which the player and missiles can be driven by input
    pub fn accepts_player_input(self) -> bool {
        self == GamePhase::Playing
    }
}

/// Events emitted for external collaborators (audio, persistence, UI)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// Pagers destroyed by missiles this tick, with the new score
    PagersDestroyed { count: u32, score: u64 },
    CheatActivated,
    /// Emitted once on entering `Summary` for the high score store
    ScoreRecorded { score: u64, level: u32 },
}

/// The player's avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub facing: Direction,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            facing: Direction::Up,
        }
    }

    /// Face `direction` and step, keeping the body inside the arena
    pub fn step(&mut self, direction: Direction, arena: &Arena) {
        self.facing = direction;
        self.pos = arena.clamp_body(self.pos + direction.unit() * PLAYER_STEP, PLAYER_SIZE);
    }
}

/// An enemy pursuing the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pager {
    /// Unique within its spawn batch
    pub id: u32,
    pub pos: Vec2,
}

/// A player projectile travelling along a cardinal direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Missile {
    pub pos: Vec2,
    pub direction: Direction,
}

impl Missile {
    pub fn advance(&mut self) {
        self.pos += self.direction.unit() * MISSILE_SPEED;
    }
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    pub arena: Arena,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulated clock, advanced by `tick_ms` every tick
    pub time_ms: u64,
    pub tick_count: u64,
    pub phase: GamePhase,
    /// Pending automatic transition; dropped on every phase change
    phase_deadline: Option<u64>,
    pub level: u32,
    pub score: u64,
    pub player: Player,
    pub pagers: Vec<Pager>,
    pub missiles: Vec<Missile>,
    pub finale: Finale,
    pub cheat: CheatDetector,
    pub cheat_mode: bool,
    cheat_banner_until: Option<u64>,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh round in `Menu`. Fails only on an invalid config.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, seed, Pcg32::seed_from_u64(seed))
    }

    /// Create a round driven by an explicit RNG
    pub fn with_rng(config: SimConfig, seed: u64, rng: Pcg32) -> Result<Self, ConfigError> {
        config.validate()?;
        let arena = config.arena();
        let mut state = Self {
            arena,
            seed,
            rng,
            time_ms: 0,
            tick_count: 0,
            phase: GamePhase::Menu,
            phase_deadline: None,
            level: 1,
            score: 0,
            player: Player::new(arena.center()),
            pagers: Vec::new(),
            missiles: Vec::new(),
            finale: Finale::default(),
            cheat: CheatDetector::default(),
            cheat_mode: false,
            cheat_banner_until: None,
            events: Vec::new(),
            config,
        };
        state.respawn_pagers();
        Ok(state)
    }

    /// Where the player starts each round; pagers spawn away from it
    pub fn player_start(&self) -> Vec2 {
        self.arena.center()
    }

    /// Replace the pager population with a fresh batch
    pub fn respawn_pagers(&mut self) {
        let start = self.player_start();
        self.pagers = spawn_batch(
            self.config.pagers_per_level,
            &self.arena,
            start,
            self.config.safe_spawn_distance,
            &mut self.rng,
        );
    }

    /// Missile body size used for hits and display
    pub fn effective_missile_size(&self) -> f32 {
        if self.cheat_mode {
            MISSILE_SIZE * CHEAT_MISSILE_SCALE
        } else {
            MISSILE_SIZE
        }
    }

    /// Move to `next` if the transition is legal.
    ///
    /// Any pending deadline belongs to the old phase and is discarded.
    pub fn set_phase(&mut self, next: GamePhase) -> bool {
        if !self.phase.can_transition_to(next) {
            log::warn!("Rejected phase change {:?} -> {:?}", self.phase, next);
            return false;
        }
        let from = self.phase;
        self.phase = next;
        self.phase_deadline = None;
        log::info!("Phase {:?} -> {:?} (level {}, score {})", from, next, self.level, self.score);
        self.events.push(GameEvent::PhaseChanged { from, to: next });
        true
    }

    /// Change phase and schedule the follow-up after `delay_ms`
    pub fn set_phase_with_deadline(&mut self, next: GamePhase, delay_ms: u64) -> bool {
        if !self.set_phase(next) {
            return false;
        }
        self.phase_deadline = Some(self.time_ms + delay_ms);
        true
    }

    pub fn phase_deadline(&self) -> Option<u64> {
        self.phase_deadline
    }

    /// True once the current phase's deadline has passed
    pub fn deadline_reached(&self) -> bool {
        self.phase_deadline.is_some_and(|deadline| self.time_ms >= deadline)
    }

    pub fn show_cheat_banner(&mut self) {
        self.cheat_banner_until = Some(self.time_ms + CHEAT_BANNER_MS);
    }

    /// Whether the cosmetic "activated" notice is still up
    pub fn cheat_banner_visible(&self) -> bool {
        self.cheat_banner_until.is_some_and(|until| self.time_ms < until)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Restore every piece of round state to its initial value.
    ///
    /// The clock, tick counter and RNG stream keep running.
    pub(crate) fn reset_round(&mut self) {
        self.level = 1;
        self.score = 0;
        self.player = Player::new(self.player_start());
        self.missiles.clear();
        self.finale.clear();
        self.cheat.clear();
        self.cheat_mode = false;
        self.cheat_banner_until = None;
        self.phase_deadline = None;
        self.respawn_pagers();
    }

    /// Immutable view for render/audio/persistence observers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick_count,
            time_ms: self.time_ms,
            phase: self.phase,
            player: self.player,
            pagers: self.pagers.clone(),
            missiles: self.missiles.clone(),
            finale_missiles: self.finale.missiles.clone(),
            explosions: self.finale.explosions.clone(),
            score: self.score,
            level: self.level,
            cheat_mode: self.cheat_mode,
            cheat_banner: self.cheat_banner_visible(),
            missile_size: self.effective_missile_size(),
        }
    }
}

/// Per-tick state published to observers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub time_ms: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub pagers: Vec<Pager>,
    pub missiles: Vec<Missile>,
    pub finale_missiles: Vec<FinaleMissile>,
    pub explosions: Vec<Explosion>,
    pub score: u64,
    pub level: u32,
    pub cheat_mode: bool,
    pub cheat_banner: bool,
    /// Display and hit size of missiles (amplified in cheat mode)
    pub missile_size: f32,
}
