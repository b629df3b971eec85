//! Loot selection, structure deployment and combat waves.

use hecs::Entity;

use nexus_combat::tasks::{Lockout, TaskStatus};
use nexus_core::commands::InputEvent;
use nexus_core::constants::{FINAL_LEVEL, WAVE_BANNER_SECS};
use nexus_core::enums::{EffectKind, LootButton, StructureKind};
use nexus_core::events::{GameEvent, PresentationEvent};
use nexus_core::models::{NexusStats, UnitStats};
use nexus_core::state::WaveView;

use super::{GameState, Stage};
use crate::bus::Topic;
use crate::director::{WaveDirector, WaveOutcome};
use crate::rewards::{self, Reward};
use crate::session::Session;
use crate::world_setup;

/// Binary reward choice offered after a cleared level.
#[derive(Debug)]
pub struct Loot {
    level: u32,
}

impl Loot {
    pub fn new(level: u32) -> Self {
        Self { level }
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Stage for Loot {
    fn enter(&mut self, session: &mut Session) {
        // The player stays out of play until the next wave starts.
        session.set_player_controllable(false);
        session.set_marker_checks(false, false);
        session.set_action_input(false);
        session.set_direction_input(false);

        let offer = rewards::offer(self.level);
        session.show_view("Loot");
        session.present(PresentationEvent::DecorateLoot {
            level: self.level,
            final_level: FINAL_LEVEL,
            a_header: offer.a.header.to_string(),
            a_description: offer.a.description.to_string(),
            b_header: offer.b.header.to_string(),
            b_description: offer.b.description.to_string(),
        });
        session.bus.subscribe(Topic::Loot);
    }

    fn exit(&mut self, session: &mut Session) {
        session.close_view("Loot");
    }

    fn on_loot(&mut self, session: &mut Session, button: LootButton) {
        let entry = rewards::reward_for(self.level, button);
        log::info!("loot {}: picked {}", self.level, entry.header);
        session.play_effect(EffectKind::Click, session.cursor);

        let next = match entry.reward {
            Reward::PlaceStructure(kind) => GameState::deploy(kind, self.level),
            Reward::MaxHealthFraction(fraction) => {
                if let Ok(mut nexus) = session.world.get::<&mut NexusStats>(session.actors.nexus) {
                    let delta = nexus.maximum_health * fraction;
                    nexus.modify_maximum_health(delta);
                }
                GameState::play_after(self.level)
            }
            Reward::PlayerDamage(delta) => {
                if let Ok(mut stats) = session.world.get::<&mut UnitStats>(session.actors.player) {
                    stats.modify_damage(delta);
                }
                GameState::play_after(self.level)
            }
            Reward::EnemySpeed(multiplier) => {
                session.modifiers.enemy_speed_multiplier = multiplier;
                GameState::play_after(self.level)
            }
            Reward::EnemyDamage(bonus) => {
                session.modifiers.enemy_damage_bonus = bonus;
                GameState::play_after(self.level)
            }
        };
        session.change_state(next);
    }
}

/// Place the structure won in loot. The preview follows the cursor until a click fixes it.
#[derive(Debug)]
pub struct Deploy {
    kind: StructureKind,
    level: u32,
    preview: Option<Entity>,
}

impl Deploy {
    pub fn new(kind: StructureKind, level: u32) -> Self {
        Self {
            kind,
            level,
            preview: None,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn kind(&self) -> StructureKind {
        self.kind
    }
}

impl Stage for Deploy {
    fn enter(&mut self, session: &mut Session) {
        session.close_view("Loot");
        session.permits.deployment = true;
        session.set_action_input(true);
        session.bus.subscribe(Topic::Action);
        self.preview = Some(world_setup::spawn_structure_preview(session, self.kind));
    }

    fn exit(&mut self, session: &mut Session) {
        session.permits.deployment = false;
        session.set_action_input(true);
        session.set_direction_input(true);
    }

    fn on_action(&mut self, session: &mut Session, event: InputEvent) {
        let InputEvent::ActionStarted { position } = event else {
            return;
        };
        let Some(preview) = self.preview.take() else {
            return;
        };
        world_setup::deploy_structure(session, preview, position);
        session.bus.unsubscribe(Topic::Action);
        session.change_state(GameState::play_after(self.level));
    }
}

/// One combat wave.
#[derive(Debug)]
pub struct Play {
    level: u32,
    director: Option<WaveDirector>,
    banner: Option<Lockout>,
}

impl Play {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            director: None,
            banner: None,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn director(&self) -> Option<&WaveDirector> {
        self.director.as_ref()
    }

    pub fn wave(&self) -> Option<WaveView> {
        self.director.as_ref().map(WaveDirector::view)
    }
}

impl Stage for Play {
    fn enter(&mut self, session: &mut Session) {
        session.set_marker_checks(true, true);
        session.set_player_controllable(true);
        session.set_action_input(true);
        session.set_direction_input(true);
        session.permits.enemy_spawning = true;

        let spec = session.config.wave(self.level);
        self.director = Some(WaveDirector::new(spec, session.config.wave_start_grace_secs));
        session.bus.subscribe(Topic::Enemy);

        session.present(PresentationEvent::DecorateLevel { level: self.level });
        session.show_view("Wave Start");
        self.banner = Some(Lockout::new(WAVE_BANNER_SECS));

        log::info!(
            "level {} started: {} enemies over {:.1}s",
            self.level,
            spec.capacity,
            spec.duration_secs
        );
        session.emit(GameEvent::LevelStarted { level: self.level });
    }

    fn update(&mut self, session: &mut Session, dt: f32) {
        if let Some(banner) = self.banner.as_mut() {
            if banner.advance(dt) == TaskStatus::Finished {
                self.banner = None;
                session.close_view("Wave Start");
            }
        }

        if !session.permits.enemy_spawning {
            return;
        }
        if let Some(director) = self.director.as_mut() {
            if director.tick(dt).is_some() {
                world_setup::spawn_wave_enemy(session);
            }
        }
    }

    fn exit(&mut self, session: &mut Session) {
        session.permits.enemy_spawning = false;
    }

    fn on_event(&mut self, session: &mut Session, event: &GameEvent) {
        let GameEvent::EnemyDefeated { .. } = event else {
            return;
        };
        let Some(director) = self.director.as_mut() else {
            return;
        };
        let Some(outcome) = director.record_defeat() else {
            return;
        };

        log::info!("level {} complete", self.level);
        session.emit(GameEvent::LevelComplete { level: self.level });
        let delay = session.config.level_complete_delay_secs;
        let next = match outcome {
            WaveOutcome::Loot(level) => GameState::loot(level),
            WaveOutcome::Victory => GameState::victory(),
        };
        session.change_state_after(next, delay);
    }
}
