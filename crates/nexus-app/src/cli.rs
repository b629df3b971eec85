//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use nexus_core::config::GameConfig;
use nexus_sim::SimConfig;

use crate::AppError;

/// Headless nexus defense simulation
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// RNG seed. Same seed and inputs give the same session.
    #[arg(short, long, default_value_t = 42)]
    pub seed: u64,

    /// Stop after this many ticks.
    #[arg(short, long)]
    pub ticks: Option<u64>,

    /// Game config as JSON. Missing fields use the defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Replay a script of timed commands (JSON lines) instead of reading stdin live.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Emit every n-th snapshot. 0 emits none.
    #[arg(long, default_value_t = 1)]
    pub snapshot_every: u64,

    /// Initial time scale for live sessions.
    #[arg(long, default_value_t = 1.0)]
    pub time_scale: f32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Engine configuration from the arguments, loading the config file if given.
    pub fn sim_config(&self) -> Result<SimConfig, AppError> {
        let game = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                GameConfig::from_json(&json)?
            }
            None => GameConfig::default(),
        };
        Ok(SimConfig {
            seed: self.seed,
            time_scale: self.time_scale,
            game,
        })
    }
}
