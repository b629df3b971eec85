//! Player commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Discrete input delivered by the excluded input surface, in occurrence order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    /// Pointer pressed at a world position.
    ActionStarted { position: Position },
    ActionEnded { position: Position },
    /// Pointer moved while pressed, or hovered during deployment.
    ActionMoved { position: Position },
    DirectionStarted { direction: Direction },
    DirectionEnded { direction: Direction },
}

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    Input { event: InputEvent },
    /// A loot window button was clicked.
    ChooseLoot { button: LootButton },
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f32 },
    Pause,
    Resume,
}

impl InputEvent {
    pub fn position(&self) -> Option<Position> {
        match *self {
            InputEvent::ActionStarted { position }
            | InputEvent::ActionEnded { position }
            | InputEvent::ActionMoved { position } => Some(position),
            InputEvent::DirectionStarted { .. } | InputEvent::DirectionEnded { .. } => None,
        }
    }

    pub fn is_action(&self) -> bool {
        self.position().is_some()
    }
}
