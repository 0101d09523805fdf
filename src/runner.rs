//! Game loop task
//!
//! One tokio task owns the `GameState`. Commands arrive on an mpsc queue and
//! are applied between ticks; a fixed interval drives the simulation. After
//! every tick or command the task publishes a fresh `Snapshot` (watch) and
//! forwards drained `GameEvent`s (broadcast).

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::{ConfigError, SimConfig};
use crate::sim::{Command, GameEvent, GameState, Snapshot, apply_command, tick};

/// Pending commands before senders start waiting
const COMMAND_QUEUE: usize = 256;
/// Events a slow subscriber may fall behind by before it lags
const EVENT_BUFFER: usize = 1024;

/// Handle to a running game task
pub struct GameHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Snapshot>,
    events: broadcast::Sender<GameEvent>,
    task: JoinHandle<GameState>,
}

impl GameHandle {
    /// Queue a command for the next gap between ticks
    pub async fn send(&self, command: Command) -> Result<(), mpsc::error::SendError<Command>> {
        self.commands.send(command).await
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified after every tick and command
    pub fn snapshots(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Events emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Close the command queue and wait for the task to hand back the state
    pub async fn shutdown(self) -> Result<GameState, tokio::task::JoinError> {
        drop(self.commands);
        self.task.await
    }
}

/// Build a round and start its loop on the current runtime
pub fn spawn_game(config: SimConfig, seed: u64) -> Result<GameHandle, ConfigError> {
    let state = GameState::new(config, seed)?;
    let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE);
    let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
    let (event_tx, _) = broadcast::channel(EVENT_BUFFER);

    log::info!(
        "Starting game (seed {}, tick {}ms, arena {}x{})",
        seed,
        state.config.tick_ms,
        state.arena.width,
        state.arena.height
    );

    let task = tokio::spawn(game_task(state, command_rx, snapshot_tx, event_tx.clone()));

    Ok(GameHandle {
        commands: command_tx,
        snapshots: snapshot_rx,
        events: event_tx,
        task,
    })
}

async fn game_task(
    mut state: GameState,
    mut command_rx: mpsc::Receiver<Command>,
    snapshot_tx: watch::Sender<Snapshot>,
    event_tx: broadcast::Sender<GameEvent>,
) -> GameState {
    let period = Duration::from_millis(state.config.tick_ms);
    // First tick one period from now, not immediately
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // A due tick goes first so a busy command queue cannot stall the clock
            biased;
            _ = interval.tick() => {
                tick(&mut state);
            }
            command = command_rx.recv() => {
                let Some(command) = command else {
                    break;
                };
                apply_command(&mut state, command);
            }
        }

        snapshot_tx.send_replace(state.snapshot());
        for event in state.drain_events() {
            // No subscribers is fine
            let _ = event_tx.send(event);
        }
    }

    log::info!(
        "Game loop stopped after {} ticks (score {}, level {})",
        state.tick_count,
        state.score,
        state.level
    );
    state
}
