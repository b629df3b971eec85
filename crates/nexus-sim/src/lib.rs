//! Simulation engine for the nexus defense game.
//!
//! Owns the hecs ECS world and the session context, drives the progression
//! state machine, runs systems at a fixed tick rate, and produces
//! `GameStateSnapshot`s for whatever front end is attached.

pub mod bus;
pub mod director;
pub mod engine;
pub mod los;
pub mod progression;
pub mod rewards;
pub mod session;
pub mod systems;
pub mod tasks;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use nexus_core as core;

#[cfg(test)]
mod tests;
