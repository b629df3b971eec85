//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods. `Position`,
//! `UnitStats`, `NexusStats` and `UnitPhase` are also attached as components.
//! Components holding resumable task state live in the sim crate.

use serde::{Deserialize, Serialize};

use crate::enums::StructureKind;

/// Marks the defended base. Exactly one per session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Nexus;

/// Marks the player-controlled unit. Exactly one per session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks a homing enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Per-enemy flags.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EnemyState {
    /// Set once on defeat. A fleeing enemy ignores damage and cannot be targeted.
    pub fleeing: bool,
    /// Held in place by a tutorial script.
    pub held: bool,
}

/// Square collision box. Disabled boxes are invisible to clicks and probes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HitBox {
    pub half_extent: f32,
    pub enabled: bool,
}

/// Monotonic spawn counter used for stable target tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);

/// A placeable structure. Undeployed structures follow the cursor and do nothing else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Structure {
    pub kind: StructureKind,
    pub deployed: bool,
}
