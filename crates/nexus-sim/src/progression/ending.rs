//! Victory and defeat screens. Terminal until the session restarts.

use nexus_combat::tasks::{Lockout, TaskStatus};
use nexus_core::commands::InputEvent;
use nexus_core::constants::END_SCREEN_ARM_SECS;
use nexus_core::enums::EffectKind;

use super::Stage;
use crate::bus::Topic;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndKind {
    Victory,
    Defeat,
}

#[derive(Debug)]
pub struct EndScreen {
    kind: EndKind,
    /// Clicks restart only once this runs out.
    arm: Option<Lockout>,
}

impl EndScreen {
    pub fn new(kind: EndKind) -> Self {
        Self { kind, arm: None }
    }

    pub fn kind(&self) -> EndKind {
        self.kind
    }

    fn view(&self) -> &'static str {
        match self.kind {
            EndKind::Victory => "Victory Screen",
            EndKind::Defeat => "Defeat Screen",
        }
    }
}

impl Stage for EndScreen {
    fn enter(&mut self, session: &mut Session) {
        session.set_marker_checks(false, false);
        session.set_player_controllable(false);
        session.set_action_input(true);
        session.close_all_views();
        session.show_view(self.view());
        self.arm = Some(Lockout::new(END_SCREEN_ARM_SECS));

        match self.kind {
            EndKind::Victory => log::info!("victory"),
            EndKind::Defeat => {
                log::info!("defeat: nexus at {:.1}", session.nexus_stats().current_health)
            }
        }
    }

    fn update(&mut self, session: &mut Session, dt: f32) {
        if let Some(arm) = self.arm.as_mut() {
            if arm.advance(dt) == TaskStatus::Finished {
                self.arm = None;
                session.bus.subscribe(Topic::Action);
            }
        }
    }

    fn on_action(&mut self, session: &mut Session, event: InputEvent) {
        if let InputEvent::ActionStarted { position } = event {
            session.play_effect(EffectKind::Click, position);
            session.bus.unsubscribe(Topic::Action);
            session.request_restart();
        }
    }
}
