//! Game loop thread: runs the simulation engine at the tick rate and publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots are sent back over a second
//! channel and stored in shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use nexus_core::constants::TICK_RATE;
use nexus_core::state::GameStateSnapshot;
use nexus_sim::{SimConfig, SimulationEngine};

use crate::state::{GameLoopCommand, LoopHandle};
use crate::AppError;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// The loop stops on `Shutdown`, when either channel disconnects, or after
/// `tick_limit` ticks.
pub fn spawn_game_loop(
    config: SimConfig,
    snapshot_tx: mpsc::Sender<GameStateSnapshot>,
    tick_limit: Option<u64>,
) -> Result<LoopHandle, AppError> {
    config.game.validate()?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("nexus-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, snapshot_tx, &shared, tick_limit);
        })?;

    Ok(LoopHandle {
        command_tx: cmd_tx,
        latest_snapshot,
        thread,
    })
}

/// The game loop. Runs until Shutdown command, channel disconnect or the tick limit.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    snapshot_tx: mpsc::Sender<GameStateSnapshot>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    tick_limit: Option<u64>,
) {
    let mut engine = match SimulationEngine::new(config) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("cannot start simulation: {err}");
            return;
        }
    };
    let mut next_tick_time = Instant::now();
    let mut ticks = 0u64;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        ticks += 1;

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }

        // 4. Publish; a dropped receiver ends the session
        if snapshot_tx.send(snapshot).is_err() {
            return;
        }
        if tick_limit.is_some_and(|limit| ticks >= limit) {
            log::info!("tick limit {ticks} reached");
            return;
        }

        // 5. Sleep until next tick. Time scale is applied inside the engine.
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
