//! Game state snapshot: the complete visible state produced after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{GameEvent, PresentationEvent};
use crate::models::SessionModifiers;
use crate::types::{Position, SimTime};

/// Subsystems the live progression state currently allows.
///
/// Every state's `enter`/`exit` toggles these; nothing else writes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permits {
    /// Player unit responds to direction input and may act on markers.
    pub movement: bool,
    /// Pointer events are delivered at all.
    pub action_input: bool,
    /// Direction key events are delivered at all.
    pub direction_input: bool,
    pub nexus_targeting: bool,
    pub enemy_targeting: bool,
    pub enemy_spawning: bool,
    pub deployment: bool,
}

/// Complete game state after each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub state: StateId,
    /// Wave level while in Play, loot level while in Loot/Deploy.
    pub level: Option<u32>,
    pub paused: bool,
    pub nexus: NexusView,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub structures: Vec<StructureView>,
    pub projectiles: Vec<Position>,
    pub wave: Option<WaveView>,
    pub permits: Permits,
    pub modifiers: SessionModifiers,
    pub events: Vec<GameEvent>,
    pub presentation: Vec<PresentationEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NexusView {
    pub current_health: f32,
    pub maximum_health: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub phase: UnitPhase,
    pub speed: f32,
    pub damage: f32,
    /// Entities currently carrying an engagement marker.
    pub nexus_marked: bool,
    pub marked_enemies: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub entity: u64,
    pub position: Position,
    pub health: f32,
    pub phase: UnitPhase,
    pub fleeing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureView {
    pub kind: StructureKind,
    pub position: Position,
    pub deployed: bool,
}

/// Counters of the active combat wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveView {
    pub level: u32,
    pub spawned: u32,
    pub deaths: u32,
    pub capacity: u32,
    /// Seconds until the next spawn is due (0 once the wave is fully spawned).
    pub spawn_interval_remaining: f32,
}
