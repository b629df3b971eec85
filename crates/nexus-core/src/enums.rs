//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Placeable structure offered by loot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    /// Shoots arrows at the nearest enemy in range.
    Tower,
    /// Boosts the player's speed while nearby.
    Shed,
    /// Wanders and lunges at nearby enemies. Has no hit box.
    Dog,
    /// Decorative obstacle.
    Cat,
}

/// Movement/engagement phase of a unit, as reported in snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitPhase {
    #[default]
    Idle,
    Approaching,
    Engaging,
    /// Defeated and running off the field. Terminal.
    Fleeing,
    /// Stunned, held by a script, or otherwise not allowed to act.
    Disabled,
}

/// Payload-free tag of a progression state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateId {
    Initial,
    InitialMovement,
    InitialDialogue,
    InitialStep,
    SecondStep,
    SecondMovement,
    SecondDialogue,
    ThirdStep,
    Loot,
    Deploy,
    Play,
    Victory,
    Defeat,
}

/// Which of the two loot buttons the player pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootButton {
    A,
    B,
}

/// Cardinal input direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What a resolved engagement marker was attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    Nexus,
    Enemy,
}

/// Transient effects requested from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Blood,
    NexusHeal,
    NexusHurt,
    ArrowShot,
    DogBark,
    RunAway,
    Click,
}

impl StateId {
    /// Victory and defeat end the session; only a restart leaves them.
    pub fn is_terminal(self) -> bool {
        matches!(self, StateId::Victory | StateId::Defeat)
    }

    pub fn is_tutorial(self) -> bool {
        matches!(
            self,
            StateId::Initial
                | StateId::InitialMovement
                | StateId::InitialDialogue
                | StateId::InitialStep
                | StateId::SecondStep
                | StateId::SecondMovement
                | StateId::SecondDialogue
                | StateId::ThirdStep
        )
    }
}
