//! Core types and definitions for the nexus defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity models, components, commands, state snapshots, events, constants
//! and the tunable game configuration. It has no dependency on any runtime
//! framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod models;
pub mod state;
pub mod types;
