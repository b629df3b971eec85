//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the session and the progression state machine,
//! processes player commands, runs all systems and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;

use nexus_core::commands::{InputEvent, PlayerCommand};
use nexus_core::config::{ConfigError, GameConfig};
use nexus_core::constants::DT;
use nexus_core::enums::StateId;
use nexus_core::state::GameStateSnapshot;
use nexus_core::types::SimTime;

use crate::progression::{GameState, StateMachine};
use crate::session::{Session, Transition};
use crate::systems;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f32,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the session, the live state and the clock.
pub struct SimulationEngine {
    session: Session,
    machine: StateMachine,
    time: SimTime,
    time_scale: f32,
    paused: bool,
    command_queue: VecDeque<PlayerCommand>,
}

impl SimulationEngine {
    /// Create an engine and enter the opening state.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.game.validate()?;
        let mut session = Session::new(config.game, config.seed);
        let machine = StateMachine::start(&mut session);
        log::info!("session started with seed {}", config.seed);
        Ok(Self {
            session,
            machine,
            time: SimTime::default(),
            time_scale: config.time_scale.clamp(0.0, 4.0),
            paused: false,
            command_queue: VecDeque::new(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one fixed tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.tick_with(DT)
    }

    /// Advance by `dt` seconds of unscaled time.
    pub fn tick_with(&mut self, dt: f32) -> GameStateSnapshot {
        self.process_commands();

        if !self.paused {
            let scaled = dt * self.time_scale;
            self.run_systems(scaled);
            self.time.advance(scaled);
        }

        if self.session.take_restart() {
            self.restart();
        }

        systems::snapshot::build_snapshot(&mut self.session, &self.machine, self.time, self.paused)
    }

    /// Request an immediate transition, subject to the machine's conflict policy.
    pub fn change_state(&mut self, next: GameState) {
        self.machine
            .request(&mut self.session, Transition::Now(next));
    }

    /// Request a delayed transition, subject to the machine's conflict policy.
    pub fn change_state_after(&mut self, next: GameState, delay_secs: f32) {
        self.machine
            .request(&mut self.session, Transition::After(next, delay_secs));
    }

    /// Throw the session away and start over from the opening state.
    pub fn restart(&mut self) {
        log::info!("restarting session from {:?}", self.machine.id());
        self.session.reset();
        self.machine = StateMachine::start(&mut self.session);
        self.time = SimTime::default();
    }

    pub fn state(&self) -> StateId {
        self.machine.id()
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.session.world
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Input { event } => self.handle_input(event),
            PlayerCommand::ChooseLoot { button } => {
                self.machine.handle_loot(&mut self.session, button);
                self.machine.dispatch_events(&mut self.session);
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::Pause => self.paused = true,
            PlayerCommand::Resume => self.paused = false,
        }
    }

    /// Deliver one input event. The player unit sees a click before the live state does.
    fn handle_input(&mut self, event: InputEvent) {
        if let Some(position) = event.position() {
            self.session.cursor = position;
        }

        if event.is_action() {
            if !self.session.permits.action_input {
                return;
            }
            systems::player::handle_action(&mut self.session, event);
            self.machine.handle_action(&mut self.session, event);
        } else {
            if !self.session.permits.direction_input {
                return;
            }
            systems::player::handle_direction(&mut self.session, event);
        }
        self.machine.dispatch_events(&mut self.session);
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Live state: pending transition, scripts, wave spawning
        self.machine.update(&mut self.session, dt);
        // 2. Pointer input suspension
        self.session.tick_input_lock(dt);
        // 3. Player movement, control release, markers
        systems::player::run(&mut self.session, dt);
        // 4. Enemy AI (homing, strikes on the nexus, fleeing)
        systems::enemy_ai::run(&mut self.session, dt);
        // 5. Structures (towers, dogs, sheds, previews)
        systems::structures::run(&mut self.session, dt);
        // 6. Arrows in flight
        systems::projectiles::run(&mut self.session, dt);
        // 7. Cleanup (fled enemies)
        systems::cleanup::run(&mut self.session);
        // 8. Route this tick's gameplay events to the live state
        self.machine.dispatch_events(&mut self.session);
    }
}
