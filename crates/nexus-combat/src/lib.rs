//! Engagement resolution for the nexus defense simulation.
//!
//! Target acquisition, cooldown gating, damage outcomes, contact resolution
//! and the resumable tasks that carry timed behavior between ticks.
//! No ECS dependency; everything here operates on plain data.

pub mod cooldown;
pub mod damage;
pub mod easing;
pub mod melee;
pub mod targeting;
pub mod tasks;

pub use nexus_core as core;

#[cfg(test)]
mod tests;
