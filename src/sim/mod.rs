//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, on a simulated clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No runtime, rendering or audio dependencies

pub mod arena;
pub mod cheat;
pub mod collision;
pub mod finale;
pub mod input;
pub mod phase;
pub mod pursuit;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use cheat::{CHEAT_SEQUENCE, CheatDetector};
pub use collision::{HitReport, missile_hits_pager, player_caught, resolve_missile_hits};
pub use finale::{Explosion, Finale, FinaleMissile};
pub use input::{Command, Key, apply_command, commands_for_key};
pub use pursuit::{advance_pagers, pager_speed};
pub use spawn::spawn_batch;
pub use state::{
    Direction, GameEvent, GamePhase, GameState, Missile, Pager, Player, Snapshot,
};
pub use tick::tick;
