//! Headless front end for the nexus defense simulation.
//!
//! Wires the simulation engine to a command line: scripted replays run as
//! fast as possible, live sessions run on a paced game loop thread and read
//! commands from stdin. Snapshots go to stdout as JSON lines.

pub mod cli;
pub mod game_loop;
pub mod logging;
pub mod replay;
pub mod state;

pub use nexus_core as core;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid game config: {0}")]
    Config(#[from] nexus_core::config::ConfigError),
    #[error("script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
