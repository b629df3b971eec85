//! The scripted opening: intro, walk-on, dialogues and three guided steps.

use hecs::Entity;

use nexus_combat::tasks::{Lockout, TaskStatus};
use nexus_core::commands::InputEvent;
use nexus_core::constants::*;
use nexus_core::enums::EffectKind;
use nexus_core::events::GameEvent;
use nexus_core::models::SessionModifiers;
use nexus_core::types::Position;

use super::{GameState, Stage};
use crate::bus::Topic;
use crate::session::Session;
use crate::world_setup;

fn page_view(page: u32) -> String {
    format!("Dialog # {page}")
}

/// A run of dialogue pages dismissed by clicking. Each page ignores clicks for a moment.
#[derive(Debug)]
pub struct Dialogue {
    page: u32,
    last: u32,
    unlock: Option<Lockout>,
}

impl Dialogue {
    pub fn new((first, last): (u32, u32)) -> Self {
        Self {
            page: first,
            last,
            unlock: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    fn open(&mut self, session: &mut Session) {
        session.set_action_input(false);
        session.show_view(&page_view(self.page));
        self.unlock = Some(Lockout::new(DIALOGUE_PAGE_LOCK_SECS));
    }

    fn tick(&mut self, session: &mut Session, dt: f32) {
        if let Some(unlock) = self.unlock.as_mut() {
            if unlock.advance(dt) == TaskStatus::Finished {
                self.unlock = None;
                session.set_action_input(true);
            }
        }
    }

    /// Close the current page and open the next. True once the last page is gone.
    fn advance(&mut self, session: &mut Session) -> bool {
        session.close_view(&page_view(self.page));
        self.page += 1;
        if self.page > self.last {
            return true;
        }
        self.open(session);
        false
    }
}

/// Title card. Waits, shows the introduction, and leaves on the first click.
#[derive(Debug, Default)]
pub struct Initial {
    elapsed: f32,
    intro_shown: bool,
    instructions_shown: bool,
    leaving: Option<Lockout>,
}

impl Stage for Initial {
    fn enter(&mut self, session: &mut Session) {
        session.modifiers = SessionModifiers::default();
        session.set_player_position(Position::new(PLAYER_START_X, 0.0));
        session.set_player_controllable(false);
        session.set_marker_checks(false, false);
        session.set_direction_input(false);
        session.set_action_input(false);
        session.bus.subscribe(Topic::Action);
    }

    fn update(&mut self, session: &mut Session, dt: f32) {
        self.elapsed += dt;
        if !self.intro_shown && self.elapsed >= INTRO_DELAY_SECS {
            self.intro_shown = true;
            session.show_view("Introduction View");
        }
        if !self.instructions_shown && self.elapsed >= INTRO_DELAY_SECS + INTRO_SLIDE_SECS {
            self.instructions_shown = true;
            session.show_view("Instruction View");
            session.set_action_input(true);
        }

        if let Some(leaving) = self.leaving.as_mut() {
            if leaving.advance(dt) == TaskStatus::Finished {
                self.leaving = None;
                session.close_view("Instruction View");
                session.change_state(GameState::InitialMovement(InitialMovement));
            }
        }
    }

    fn exit(&mut self, session: &mut Session) {
        session.close_view("Introduction View");
    }

    fn on_action(&mut self, session: &mut Session, event: InputEvent) {
        if let InputEvent::ActionStarted { position } = event {
            session.play_effect(EffectKind::Click, position);
            session.bus.unsubscribe(Topic::Action);
            self.leaving = Some(Lockout::new(INTRO_EXIT_SECS));
        }
    }
}

/// The player walks on from the left edge.
#[derive(Debug)]
pub struct InitialMovement;

impl Stage for InitialMovement {
    fn enter(&mut self, session: &mut Session) {
        let walk = session.walk_player_to(Position::new(PLAYER_INTRO_STOP_X, 0.0));
        session.change_state_after(
            GameState::InitialDialogue(InitialDialogue::new()),
            walk + INTRO_WALK_PADDING_SECS,
        );
    }
}

#[derive(Debug)]
pub struct InitialDialogue {
    dialogue: Dialogue,
}

impl InitialDialogue {
    pub fn new() -> Self {
        Self {
            dialogue: Dialogue::new(INITIAL_DIALOGUE_PAGES),
        }
    }
}

impl Default for InitialDialogue {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for InitialDialogue {
    fn enter(&mut self, session: &mut Session) {
        session.bus.subscribe(Topic::Action);
        self.dialogue.open(session);
    }

    fn update(&mut self, session: &mut Session, dt: f32) {
        self.dialogue.tick(session, dt);
    }

    fn on_action(&mut self, session: &mut Session, event: InputEvent) {
        if matches!(event, InputEvent::ActionStarted { .. }) && self.dialogue.advance(session) {
            session.change_state(GameState::InitialStep(InitialStep));
        }
    }
}

/// Walk up to the nexus.
#[derive(Debug)]
pub struct InitialStep;

impl Stage for InitialStep {
    fn enter(&mut self, session: &mut Session) {
        session.show_view("Tutorial Instruction # I");
        session.set_direction_input(true);
        session.set_action_input(false);
        session.set_player_controllable(true);
        session.set_marker_checks(false, false);
    }

    fn update(&mut self, session: &mut Session, _dt: f32) {
        let distance = session.player_position().range_to(&session.nexus_position());
        if distance < PLAYER_NEXUS_RANGE {
            session.change_state(GameState::SecondStep(SecondStep));
        }
    }

    fn exit(&mut self, session: &mut Session) {
        session.close_view("Tutorial Instruction # I");
    }
}

/// Heal the nexus through its marker.
#[derive(Debug)]
pub struct SecondStep;

impl Stage for SecondStep {
    fn enter(&mut self, session: &mut Session) {
        session.set_marker_checks(true, false);
        session.set_direction_input(false);
        session.set_action_input(true);
        session.show_view("Tutorial Instruction # II");
        session.bus.subscribe(Topic::Marker);
    }

    fn exit(&mut self, session: &mut Session) {
        session.close_view("Tutorial Instruction # II");
    }

    fn on_event(&mut self, session: &mut Session, event: &GameEvent) {
        if let GameEvent::MarkerResolved { .. } = event {
            session.set_player_controllable(false);
            session.set_marker_checks(false, false);
            session.bus.unsubscribe(Topic::Marker);
            session.change_state_after(
                GameState::SecondMovement(SecondMovement::default()),
                MARKER_RESOLVE_DELAY_SECS,
            );
        }
    }
}

/// The first enemy walks in and stops short of the nexus.
#[derive(Debug, Default)]
pub struct SecondMovement {
    enemy: Option<Entity>,
}

impl SecondMovement {
    /// The scripted enemy, once spawned.
    pub fn enemy(&self) -> Option<Entity> {
        self.enemy
    }
}

impl Stage for SecondMovement {
    fn enter(&mut self, session: &mut Session) {
        let (enemy, walk) = world_setup::spawn_tutorial_enemy(session);
        self.enemy = Some(enemy);
        session.change_state_after(
            GameState::SecondDialogue(SecondDialogue::new(enemy)),
            walk + ENEMY_ARRIVAL_PADDING_SECS,
        );
    }
}

#[derive(Debug)]
pub struct SecondDialogue {
    dialogue: Dialogue,
    enemy: Entity,
}

impl SecondDialogue {
    pub fn new(enemy: Entity) -> Self {
        Self {
            dialogue: Dialogue::new(SECOND_DIALOGUE_PAGES),
            enemy,
        }
    }
}

impl Stage for SecondDialogue {
    fn enter(&mut self, session: &mut Session) {
        session.bus.subscribe(Topic::Action);
        self.dialogue.open(session);
    }

    fn update(&mut self, session: &mut Session, dt: f32) {
        self.dialogue.tick(session, dt);
    }

    fn exit(&mut self, session: &mut Session) {
        session.release_enemy(self.enemy);
        session.set_player_controllable(true);
    }

    fn on_action(&mut self, session: &mut Session, event: InputEvent) {
        if matches!(event, InputEvent::ActionStarted { .. }) && self.dialogue.advance(session) {
            session.change_state(GameState::ThirdStep(ThirdStep));
        }
    }
}

/// Defeat the first enemy.
#[derive(Debug)]
pub struct ThirdStep;

impl Stage for ThirdStep {
    fn enter(&mut self, session: &mut Session) {
        session.show_view("Tutorial Instruction # III");
        session.set_direction_input(true);
        session.set_action_input(true);
        session.set_marker_checks(false, true);
        session.bus.subscribe(Topic::Enemy);
    }

    fn exit(&mut self, session: &mut Session) {
        session.close_view("Tutorial Instruction # III");
    }

    fn on_event(&mut self, session: &mut Session, event: &GameEvent) {
        if let GameEvent::EnemyDefeated { .. } = event {
            session.bus.unsubscribe(Topic::Enemy);
            let delay = session.config.level_complete_delay_secs;
            session.change_state_after(GameState::loot(TUTORIAL_LEVEL), delay);
        }
    }
}
