use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;

use clap::Parser;

use nexus_app::cli::Args;
use nexus_app::state::GameLoopCommand;
use nexus_app::{game_loop, logging, replay, AppError};
use nexus_core::commands::PlayerCommand;
use nexus_sim::SimConfig;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = args.sim_config()?;

    if let Some(path) = &args.script {
        let script = replay::parse_script(&std::fs::read_to_string(path)?)?;
        let ticks = args.ticks.unwrap_or_else(|| script.last().map_or(0, |c| c.tick + 1));
        let stdout = std::io::stdout();
        let summary = replay::run(config, &script, ticks, args.snapshot_every, &mut stdout.lock())?;
        log::info!(
            "replay finished after {} ticks in {:?}",
            summary.ticks,
            summary.final_state
        );
        return Ok(());
    }

    live(args, config)
}

/// Paced session. Commands are read from stdin as JSON lines.
fn live(args: &Args, config: SimConfig) -> Result<(), AppError> {
    let (snapshot_tx, snapshot_rx) = mpsc::channel();
    let handle = game_loop::spawn_game_loop(config, snapshot_tx, args.ticks)?;

    let command_tx = handle.command_tx.clone();
    std::thread::Builder::new()
        .name("nexus-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<PlayerCommand>(&line) {
                    Ok(command) => {
                        if command_tx.send(GameLoopCommand::PlayerCommand(command)).is_err() {
                            break;
                        }
                    }
                    Err(err) => log::warn!("ignoring malformed command: {err}"),
                }
            }
        })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut count = 0u64;
    for snapshot in snapshot_rx {
        count += 1;
        if args.snapshot_every > 0 && count % args.snapshot_every == 0 {
            serde_json::to_writer(&mut out, &snapshot)?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    handle.shutdown();
    Ok(())
}
