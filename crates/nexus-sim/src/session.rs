//! The session context: everything a running game owns besides the live state.
//!
//! Passed by reference into the state machine, the states and every system.
//! States change the session only through the helpers here, so the permit
//! flags, the subscription list and the outgoing event queues stay consistent.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use nexus_combat::tasks::{DirectMove, Lockout, TaskStatus};
use nexus_core::components::{EnemyState, SpawnOrder};
use nexus_core::config::GameConfig;
use nexus_core::enums::EffectKind;
use nexus_core::events::{GameEvent, PresentationEvent};
use nexus_core::models::{NexusStats, SessionModifiers, UnitStats};
use nexus_core::state::Permits;
use nexus_core::types::Position;

use crate::bus::Subscriptions;
use crate::progression::GameState;
use crate::tasks::{EnemyActivity, Markers, PlayerControl};
use crate::world_setup;

/// The two entities that exist for the whole session.
#[derive(Debug, Clone, Copy)]
pub struct Actors {
    pub nexus: Entity,
    pub player: Entity,
}

/// A transition request raised by a state handler or a system.
#[derive(Debug)]
pub enum Transition {
    Now(GameState),
    After(GameState, f32),
}

pub struct Session {
    pub world: World,
    pub rng: ChaCha8Rng,
    pub config: GameConfig,
    pub actors: Actors,
    pub permits: Permits,
    pub modifiers: SessionModifiers,
    pub bus: Subscriptions,
    /// Last pointer position reported by the input surface.
    pub cursor: Position,
    pub despawn_buffer: Vec<Entity>,
    pub(crate) transitions: VecDeque<Transition>,
    pub(crate) inbox: VecDeque<GameEvent>,
    events: Vec<GameEvent>,
    presentation: Vec<PresentationEvent>,
    action_resume: Option<Lockout>,
    restart_requested: bool,
    next_spawn_order: u64,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut world = World::new();
        let actors = world_setup::setup_session(&mut world, &config);
        Self {
            world,
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            actors,
            permits: Permits::default(),
            modifiers: SessionModifiers::default(),
            bus: Subscriptions::default(),
            cursor: Position::ORIGIN,
            despawn_buffer: Vec::new(),
            transitions: VecDeque::new(),
            inbox: VecDeque::new(),
            events: Vec::new(),
            presentation: Vec::new(),
            action_resume: None,
            restart_requested: false,
            next_spawn_order: 0,
        }
    }

    /// Discard the world and all session-wide state. The RNG stream carries on.
    pub fn reset(&mut self) {
        self.world.clear();
        self.actors = world_setup::setup_session(&mut self.world, &self.config);
        self.permits = Permits::default();
        self.modifiers = SessionModifiers::default();
        self.bus.clear();
        self.cursor = Position::ORIGIN;
        self.transitions.clear();
        self.inbox.clear();
        self.action_resume = None;
        self.restart_requested = false;
        self.next_spawn_order = 0;
    }

    // --- Outgoing notifications ---

    /// Record a gameplay event for the snapshot and queue it for the live state.
    pub fn emit(&mut self, event: GameEvent) {
        self.inbox.push_back(event.clone());
        self.events.push(event);
    }

    pub fn show_view(&mut self, name: &str) {
        self.presentation.push(PresentationEvent::ShowView {
            name: name.to_string(),
        });
    }

    pub fn close_view(&mut self, name: &str) {
        self.presentation.push(PresentationEvent::CloseView {
            name: name.to_string(),
        });
    }

    pub fn close_all_views(&mut self) {
        self.presentation.push(PresentationEvent::CloseAllViews);
    }

    pub fn play_effect(&mut self, kind: EffectKind, position: Position) {
        self.presentation
            .push(PresentationEvent::PlayEffect { kind, position });
    }

    pub fn present(&mut self, event: PresentationEvent) {
        self.presentation.push(event);
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_presentation(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.presentation)
    }

    // --- Transition requests ---

    pub fn change_state(&mut self, next: GameState) {
        self.transitions.push_back(Transition::Now(next));
    }

    pub fn change_state_after(&mut self, next: GameState, delay_secs: f32) {
        self.transitions
            .push_back(Transition::After(next, delay_secs));
    }

    pub fn request_restart(&mut self) {
        self.restart_requested = true;
    }

    pub(crate) fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }

    // --- Permits ---

    /// Grant or revoke player control. Cancels a pending timed release and
    /// forgets held direction keys.
    pub fn set_player_controllable(&mut self, value: bool) {
        self.permits.movement = value;
        if let Ok(mut control) = self.world.get::<&mut PlayerControl>(self.actors.player) {
            control.moving = 0;
            control.release = None;
        }
    }

    /// Take control away from the player for `secs`, then hand it back.
    pub fn lock_player(&mut self, secs: f32) {
        self.set_player_controllable(false);
        if let Ok(mut control) = self.world.get::<&mut PlayerControl>(self.actors.player) {
            control.release = Some(Lockout::new(secs));
        }
    }

    pub fn set_action_input(&mut self, value: bool) {
        self.permits.action_input = value;
        self.action_resume = None;
    }

    /// Stop delivering pointer input for `secs`.
    pub fn suspend_action_input(&mut self, secs: f32) {
        self.permits.action_input = false;
        self.action_resume = Some(Lockout::new(secs));
    }

    pub fn set_direction_input(&mut self, value: bool) {
        self.permits.direction_input = value;
        if !value {
            if let Ok(mut control) = self.world.get::<&mut PlayerControl>(self.actors.player) {
                control.moving = 0;
            }
        }
    }

    /// Enable marker checks. Turning a check off drops that kind's markers.
    pub fn set_marker_checks(&mut self, nexus: bool, enemy: bool) {
        self.permits.nexus_targeting = nexus;
        self.permits.enemy_targeting = enemy;
        if let Ok(mut markers) = self.world.get::<&mut Markers>(self.actors.player) {
            if !nexus {
                markers.nexus = false;
            }
            if !enemy {
                markers.enemies.clear();
            }
        }
    }

    /// Advance the pointer-input suspension started by [`suspend_action_input`](Self::suspend_action_input).
    pub fn tick_input_lock(&mut self, dt: f32) {
        if let Some(lock) = self.action_resume.as_mut() {
            if lock.advance(dt) == TaskStatus::Finished {
                self.action_resume = None;
                self.permits.action_input = true;
            }
        }
    }

    // --- World helpers ---

    pub fn next_spawn_order(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.next_spawn_order);
        self.next_spawn_order += 1;
        order
    }

    pub fn player_position(&self) -> Position {
        self.world
            .get::<&Position>(self.actors.player)
            .map(|p| *p)
            .unwrap_or_default()
    }

    pub fn set_player_position(&mut self, position: Position) {
        if let Ok(mut p) = self.world.get::<&mut Position>(self.actors.player) {
            *p = position;
        }
    }

    pub fn player_stats(&self) -> UnitStats {
        self.world
            .get::<&UnitStats>(self.actors.player)
            .map(|s| *s)
            .unwrap_or_else(|_| self.config.player)
    }

    pub fn nexus_position(&self) -> Position {
        self.world
            .get::<&Position>(self.actors.nexus)
            .map(|p| *p)
            .unwrap_or_default()
    }

    pub fn nexus_stats(&self) -> NexusStats {
        self.world
            .get::<&NexusStats>(self.actors.nexus)
            .map(|s| *s)
            .unwrap_or(self.config.nexus)
    }

    /// Start a scripted walk of the player. Returns its duration in seconds.
    pub fn walk_player_to(&mut self, target: Position) -> f32 {
        let from = self.player_position();
        let walk = DirectMove::new(target, self.player_stats().speed);
        let duration = walk.duration_from(from);
        if let Ok(mut control) = self.world.get::<&mut PlayerControl>(self.actors.player) {
            control.script = Some(walk);
        }
        duration
    }

    /// Let a scripted enemy resume its own AI.
    pub fn release_enemy(&mut self, enemy: Entity) {
        if let Ok((state, activity)) = self
            .world
            .query_one_mut::<(&mut EnemyState, &mut EnemyActivity)>(enemy)
        {
            state.held = false;
            if *activity == EnemyActivity::Holding {
                *activity = EnemyActivity::Approach;
            }
        }
    }
}
