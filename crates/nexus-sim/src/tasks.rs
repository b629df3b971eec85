//! Components carrying resumable task state between ticks.
//!
//! Each entity has at most one task owning its "busy" state. Starting a new
//! task overwrites the component field, which cancels the previous owner.

use glam::Vec2;
use hecs::Entity;

use nexus_combat::cooldown::Cooldown;
use nexus_combat::tasks::{DirectMove, Lockout, Lunge, Travel};
use nexus_core::constants::{DOG_CYCLE_SECS, TOWER_CYCLE_SECS};
use nexus_core::enums::{Direction, StructureKind, UnitPhase};

const RIGHT: u8 = 1;
const DOWN: u8 = 2;
const LEFT: u8 = 4;
const UP: u8 = 8;

/// Player-only control state.
#[derive(Debug, Clone, Default)]
pub struct PlayerControl {
    /// Held direction keys as a bitmask.
    pub moving: u8,
    /// Control returns to the player when this runs out.
    pub release: Option<Lockout>,
    /// Scripted walk; runs even while the player is not controllable.
    pub script: Option<DirectMove>,
}

impl PlayerControl {
    pub fn press(&mut self, direction: Direction) {
        self.moving |= Self::bit(direction);
    }

    pub fn lift(&mut self, direction: Direction) {
        self.moving &= !Self::bit(direction);
    }

    fn bit(direction: Direction) -> u8 {
        match direction {
            Direction::Right => RIGHT,
            Direction::Down => DOWN,
            Direction::Left => LEFT,
            Direction::Up => UP,
        }
    }

    /// Unnormalised walking direction. Opposing keys cancel out, and so does
    /// holding three or more keys.
    pub fn direction(&self) -> Vec2 {
        let x = match self.moving {
            m if m == RIGHT || m == RIGHT | DOWN || m == RIGHT | UP => 1.0,
            m if m == LEFT || m == LEFT | DOWN || m == LEFT | UP => -1.0,
            _ => 0.0,
        };
        let y = match self.moving {
            m if m == DOWN || m == RIGHT | DOWN || m == LEFT | DOWN => -1.0,
            m if m == UP || m == RIGHT | UP || m == LEFT | UP => 1.0,
            _ => 0.0,
        };
        Vec2::new(x, y)
    }
}

/// Targets currently carrying an engagement marker.
#[derive(Debug, Clone, Default)]
pub struct Markers {
    pub nexus: bool,
    /// In spawn order.
    pub enemies: Vec<Entity>,
}

/// What an enemy is busy with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyActivity {
    /// Walking at the nexus, striking on contact.
    Approach,
    /// Scripted walk to a fixed point.
    Scripted(DirectMove),
    /// Standing still until a script releases it.
    Holding,
    /// Just struck the nexus.
    Recovering(Lockout),
    /// Just got hit.
    Stunned(Lockout),
    /// Defeated, running off the field. Terminal.
    Fleeing { direction: Vec2 },
}

impl EnemyActivity {
    pub fn phase(&self) -> UnitPhase {
        match self {
            EnemyActivity::Approach | EnemyActivity::Scripted(_) => UnitPhase::Approaching,
            EnemyActivity::Holding => UnitPhase::Idle,
            EnemyActivity::Recovering(_) => UnitPhase::Engaging,
            EnemyActivity::Stunned(_) => UnitPhase::Disabled,
            EnemyActivity::Fleeing { .. } => UnitPhase::Fleeing,
        }
    }
}

/// Per-kind behavior state of a deployed structure.
#[derive(Debug, Clone)]
pub enum StructureBrain {
    Tower {
        cooldown: Cooldown,
        target: Option<Entity>,
    },
    Dog {
        cooldown: Cooldown,
        target: Option<Entity>,
        wander: Option<DirectMove>,
        lunge: Option<(Lunge, Entity)>,
    },
    Shed {
        boosted: bool,
    },
    Inert,
}

impl StructureBrain {
    pub fn for_kind(kind: StructureKind) -> Self {
        match kind {
            StructureKind::Tower => StructureBrain::Tower {
                cooldown: Cooldown::new(TOWER_CYCLE_SECS),
                target: None,
            },
            StructureKind::Dog => StructureBrain::Dog {
                cooldown: Cooldown::new(DOG_CYCLE_SECS),
                target: None,
                wander: None,
                lunge: None,
            },
            StructureKind::Shed => StructureBrain::Shed { boosted: false },
            StructureKind::Cat => StructureBrain::Inert,
        }
    }
}

/// A tower arrow in flight.
#[derive(Debug, Clone, Copy)]
pub struct Arrow {
    pub target: Entity,
    pub travel: Travel,
}
