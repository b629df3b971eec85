//! Events emitted by the simulation.
//!
//! `GameEvent`s are cross-component notifications routed to the live
//! progression state. `PresentationEvent`s are one-way requests to the
//! excluded view/audio layer; the simulation never reads anything back.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Gameplay notifications. Entity ids are `hecs::Entity::to_bits()` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    EnemySpawned { entity: u64, position: Position },
    /// Non-lethal hit. The enemy is stunned.
    EnemyDamaged { entity: u64, remaining: f32 },
    /// Health reached zero; the enemy starts fleeing.
    EnemyDefeated { entity: u64 },
    /// A fleeing enemy left the field and was released.
    EnemyFled { entity: u64 },
    NexusDamaged { amount: f32, remaining: f32 },
    NexusHealed { amount: f32, current: f32 },
    MarkerResolved { kind: MarkerKind },
    StructureDeployed { kind: StructureKind, position: Position },
    LevelStarted { level: u32 },
    LevelComplete { level: u32 },
    StateChanged { from: Option<StateId>, to: StateId },
}

/// Notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PresentationEvent {
    ShowView { name: String },
    CloseView { name: String },
    CloseAllViews,
    PlayEffect { kind: EffectKind, position: Position },
    /// Fill in the loot window for the given level.
    DecorateLoot {
        level: u32,
        final_level: u32,
        a_header: String,
        a_description: String,
        b_header: String,
        b_description: String,
    },
    DecorateLevel { level: u32 },
}
