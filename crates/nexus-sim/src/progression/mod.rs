//! Game progression: the ordered script of tutorial, loot, deployment and
//! combat states, and the machine that runs exactly one of them at a time.
//!
//! A state is a variant of [`GameState`] carrying its own data. All variants
//! share the [`Stage`] interface. `enter` and `exit` set the permits and
//! subscriptions that decide which subsystems are live.

mod combat;
mod ending;
pub mod machine;
mod tutorial;

use nexus_core::commands::InputEvent;
use nexus_core::enums::{LootButton, StateId, StructureKind};
use nexus_core::events::GameEvent;
use nexus_core::state::WaveView;

use crate::session::Session;

pub use combat::{Deploy, Loot, Play};
pub use ending::{EndKind, EndScreen};
pub use machine::StateMachine;
pub use tutorial::{
    Dialogue, Initial, InitialDialogue, InitialMovement, InitialStep, SecondDialogue,
    SecondMovement, SecondStep, ThirdStep,
};

/// Behavior shared by every progression state.
///
/// Handlers other than `enter`/`update`/`exit` run only while the state holds
/// the matching bus subscription.
pub trait Stage {
    fn enter(&mut self, session: &mut Session);

    fn update(&mut self, _session: &mut Session, _dt: f32) {}

    fn exit(&mut self, _session: &mut Session) {}

    fn on_action(&mut self, _session: &mut Session, _event: InputEvent) {}

    fn on_loot(&mut self, _session: &mut Session, _button: LootButton) {}

    fn on_event(&mut self, _session: &mut Session, _event: &GameEvent) {}
}

#[derive(Debug)]
pub enum GameState {
    Initial(Initial),
    InitialMovement(InitialMovement),
    InitialDialogue(InitialDialogue),
    InitialStep(InitialStep),
    SecondStep(SecondStep),
    SecondMovement(SecondMovement),
    SecondDialogue(SecondDialogue),
    ThirdStep(ThirdStep),
    Loot(Loot),
    Deploy(Deploy),
    Play(Play),
    Victory(EndScreen),
    Defeat(EndScreen),
}

impl GameState {
    pub fn initial() -> Self {
        GameState::Initial(Initial::default())
    }

    pub fn loot(level: u32) -> Self {
        GameState::Loot(Loot::new(level))
    }

    pub fn deploy(kind: StructureKind, level: u32) -> Self {
        GameState::Deploy(Deploy::new(kind, level))
    }

    /// Combat for the level following loot level `loot_level`.
    pub fn play_after(loot_level: u32) -> Self {
        GameState::Play(Play::new(loot_level + 1))
    }

    pub fn victory() -> Self {
        GameState::Victory(EndScreen::new(EndKind::Victory))
    }

    pub fn defeat() -> Self {
        GameState::Defeat(EndScreen::new(EndKind::Defeat))
    }

    pub fn id(&self) -> StateId {
        match self {
            GameState::Initial(_) => StateId::Initial,
            GameState::InitialMovement(_) => StateId::InitialMovement,
            GameState::InitialDialogue(_) => StateId::InitialDialogue,
            GameState::InitialStep(_) => StateId::InitialStep,
            GameState::SecondStep(_) => StateId::SecondStep,
            GameState::SecondMovement(_) => StateId::SecondMovement,
            GameState::SecondDialogue(_) => StateId::SecondDialogue,
            GameState::ThirdStep(_) => StateId::ThirdStep,
            GameState::Loot(_) => StateId::Loot,
            GameState::Deploy(_) => StateId::Deploy,
            GameState::Play(_) => StateId::Play,
            GameState::Victory(_) => StateId::Victory,
            GameState::Defeat(_) => StateId::Defeat,
        }
    }

    /// Wave level in combat, loot level in loot and deployment.
    pub fn level(&self) -> Option<u32> {
        match self {
            GameState::Loot(s) => Some(s.level()),
            GameState::Deploy(s) => Some(s.level()),
            GameState::Play(s) => Some(s.level()),
            _ => None,
        }
    }

    pub fn wave(&self) -> Option<WaveView> {
        match self {
            GameState::Play(s) => s.wave(),
            _ => None,
        }
    }

    pub fn stage(&mut self) -> &mut dyn Stage {
        match self {
            GameState::Initial(s) => s,
            GameState::InitialMovement(s) => s,
            GameState::InitialDialogue(s) => s,
            GameState::InitialStep(s) => s,
            GameState::SecondStep(s) => s,
            GameState::SecondMovement(s) => s,
            GameState::SecondDialogue(s) => s,
            GameState::ThirdStep(s) => s,
            GameState::Loot(s) => s,
            GameState::Deploy(s) => s,
            GameState::Play(s) => s,
            GameState::Victory(s) | GameState::Defeat(s) => s,
        }
    }
}
