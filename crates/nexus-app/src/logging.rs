//! Diagnostics for the `nexus` binary.
//!
//! Stdout carries nothing but JSON snapshot lines, one per emitted tick, so a
//! front end or a diff tool can consume it directly. Everything human-readable
//! (session start, level results, state transitions with `-v`) is written by
//! env_logger to stderr.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Install the stderr logger. `-v` adds transition and dropped-request
/// tracing; `RUST_LOG` wins over both.
pub fn init(verbose: bool) {
    let default = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(default.to_string()));
    builder.target(Target::Stderr);

    // A second call (tests, embedding) keeps the first logger.
    let _ = builder.try_init();
}
