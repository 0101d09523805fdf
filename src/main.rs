//! Pagertron entry point
//!
//! Drives the game from a line-based keyboard on stdin: one key name per line
//! (`up`, `down`, `left`, `right`, `space`/`fire`, `start`, `reset`,
//! `status`, `scores`, `quit`). Phase changes, music and scores go to the log.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

use pagertron::config::DEFAULT_CONFIG_FILE;
use pagertron::highscores::HighScores;
use pagertron::sim::{Command, GameEvent, Key, commands_for_key};
use pagertron::{Config, MusicDirector, spawn_game};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Commands for one input line; `None` ends the session
fn parse_line(line: &str) -> Option<Vec<Command>> {
    let name = line.trim().to_lowercase();
    let commands = match name.as_str() {
        "quit" | "exit" => return None,
        "" | "status" | "scores" => Vec::new(),
        "start" => vec![Command::Start],
        "reset" => vec![Command::Reset],
        "fire" => commands_for_key(&Key::Space),
        other => commands_for_key(&Key::from_name(other)),
    };
    Some(commands)
}

/// Log phase changes and music, and keep the leaderboard current
async fn observe(mut events: broadcast::Receiver<GameEvent>, high_scores_path: PathBuf) {
    let mut music = MusicDirector::new();
    let mut high_scores = HighScores::load(&high_scores_path);
    if let Some(track) = music.current() {
        log::info!("Music: {}", track.as_str());
    }

    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                log::warn!("Event observer fell behind, {} events dropped", missed);
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        if let Some(track) = music.on_event(&event) {
            log::info!("Music: {}", track.as_str());
        }

        match event {
            GameEvent::PhaseChanged { to, .. } => log::info!("Now in {:?}", to),
            GameEvent::CheatActivated => log::info!("Cheat activated"),
            GameEvent::PagersDestroyed { count, score } => {
                log::debug!("{} pagers down, score {}", count, score)
            }
            GameEvent::ScoreRecorded { score, level } => {
                match high_scores.add_score(score, level, now_ms()) {
                    Some(rank) => {
                        log::info!("New high score #{}: {} (level {})", rank, score, level);
                        if let Err(err) = high_scores.save(&high_scores_path) {
                            log::error!("{}", err);
                        }
                    }
                    None => log::info!("Final score {} (level {})", score, level),
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Pagertron starting...");

    let config = match std::env::args_os().nth(1) {
        Some(path) => Config::load(&PathBuf::from(path))?,
        None => Config::load_or_default(&PathBuf::from(DEFAULT_CONFIG_FILE))?,
    };
    let seed = config.seed.unwrap_or_else(now_ms);

    let game = spawn_game(config.sim.clone(), seed).context("invalid simulation config")?;
    let observer = tokio::spawn(observe(game.subscribe(), config.high_scores_path.clone()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let Some(commands) = parse_line(&line) else {
            break;
        };
        for command in commands {
            game.send(command).await.context("game loop stopped")?;
        }
        match line.trim().to_lowercase().as_str() {
            "status" => println!("{}", serde_json::to_string(&game.snapshot())?),
            "scores" => {
                let board = HighScores::load(&config.high_scores_path);
                if board.is_empty() {
                    println!("No high scores yet");
                }
                for entry in board.board_lines(now_ms()) {
                    println!("{}", entry);
                }
            }
            _ => {}
        }
    }

    let state = game.shutdown().await.context("game loop panicked")?;
    observer.await.context("event observer panicked")?;
    log::info!(
        "Session over: score {}, level {}, {} ticks",
        state.score,
        state.level,
        state.tick_count
    );
    Ok(())
}
