//! ECS systems that operate on the session world each tick.
//!
//! Systems are plain functions over `&mut Session`. They keep no state of
//! their own; task progress lives in components and gameplay consequences
//! leave as events and transition requests.

pub mod cleanup;
pub mod damage;
pub mod enemy_ai;
pub mod player;
pub mod projectiles;
pub mod snapshot;
pub mod structures;
