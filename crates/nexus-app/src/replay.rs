//! Scripted replays: timed commands fed to the engine as fast as it can tick.

use std::io::Write;

use serde::{Deserialize, Serialize};

use nexus_core::commands::PlayerCommand;
use nexus_core::enums::StateId;
use nexus_sim::{SimConfig, SimulationEngine};

use crate::AppError;

/// A command queued just before the given tick runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedCommand {
    pub tick: u64,
    pub command: PlayerCommand,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplaySummary {
    pub ticks: u64,
    pub final_state: StateId,
    pub snapshots_written: u64,
}

/// Parse a JSON-lines script. Blank lines and lines starting with `#` are skipped.
/// Commands are stably sorted by tick.
pub fn parse_script(text: &str) -> Result<Vec<ScriptedCommand>, AppError> {
    let mut script = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command = serde_json::from_str(line).map_err(|source| AppError::Script {
            line: index + 1,
            source,
        })?;
        script.push(command);
    }
    script.sort_by_key(|c: &ScriptedCommand| c.tick);
    Ok(script)
}

/// Run `ticks` ticks, feeding the script, and write every `every`-th snapshot
/// to `out` as a JSON line.
pub fn run(
    config: SimConfig,
    script: &[ScriptedCommand],
    ticks: u64,
    every: u64,
    out: &mut impl Write,
) -> Result<ReplaySummary, AppError> {
    let mut engine = SimulationEngine::new(config)?;
    let mut pending = script.iter().peekable();
    let mut written = 0;

    for tick in 0..ticks {
        while let Some(scripted) = pending.next_if(|c| c.tick <= tick) {
            engine.queue_command(scripted.command);
        }
        let snapshot = engine.tick();
        if every > 0 && (tick + 1) % every == 0 {
            serde_json::to_writer(&mut *out, &snapshot)?;
            out.write_all(b"\n")?;
            written += 1;
        }
    }
    out.flush()?;

    if pending.peek().is_some() {
        log::warn!("{} scripted commands past the last tick were never sent", pending.count());
    }
    Ok(ReplaySummary {
        ticks,
        final_state: engine.state(),
        snapshots_written: written,
    })
}
