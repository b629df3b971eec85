//! Tests for the simulation engine, the progression machine and the combat systems.

use hecs::Entity;

use nexus_combat::cooldown::Cooldown;
use nexus_combat::tasks::{DirectMove, Travel};
use nexus_core::commands::{InputEvent, PlayerCommand};
use nexus_core::components::{Enemy, EnemyState, Structure};
use nexus_core::config::GameConfig;
use nexus_core::constants::{ARROW_SPEED, DOG_CYCLE_SECS, DOG_SPEED, DT};
use nexus_core::enums::*;
use nexus_core::events::GameEvent;
use nexus_core::models::{NexusStats, UnitStats};
use nexus_core::state::{GameStateSnapshot, Permits};
use nexus_core::types::Position;

use crate::bus::Topic;
use crate::engine::{SimConfig, SimulationEngine};
use crate::progression::GameState;
use crate::systems::{self, damage};
use crate::tasks::{Arrow, EnemyActivity, StructureBrain};
use crate::world_setup;

fn engine_with(game: GameConfig) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        seed: 7,
        game,
        ..Default::default()
    })
    .unwrap()
}

fn engine() -> SimulationEngine {
    engine_with(GameConfig::default())
}

/// Tick until `done` holds, returning every snapshot produced on the way.
fn run_until(
    engine: &mut SimulationEngine,
    max_ticks: usize,
    mut done: impl FnMut(&SimulationEngine) -> bool,
) -> Vec<GameStateSnapshot> {
    let mut snapshots = Vec::new();
    for _ in 0..max_ticks {
        if done(engine) {
            return snapshots;
        }
        snapshots.push(engine.tick());
    }
    assert!(done(engine), "condition not reached in {max_ticks} ticks");
    snapshots
}

fn click(engine: &mut SimulationEngine, position: Position) -> GameStateSnapshot {
    engine.queue_command(PlayerCommand::Input {
        event: InputEvent::ActionStarted { position },
    });
    engine.tick()
}

/// Wait for pointer input to open up, then click.
fn click_when_ready(engine: &mut SimulationEngine, position: Position) -> GameStateSnapshot {
    run_until(engine, 600, |e| e.session().permits.action_input);
    click(engine, position)
}

fn count_events(snapshots: &[GameStateSnapshot], pred: impl Fn(&GameEvent) -> bool) -> usize {
    snapshots
        .iter()
        .flat_map(|s| s.events.iter())
        .filter(|e| pred(e))
        .count()
}

fn live_enemies(engine: &SimulationEngine) -> Vec<Entity> {
    let mut query = engine.world().query::<(&Enemy, &EnemyState)>();
    query
        .iter()
        .filter(|(_, (_, state))| !state.fleeing)
        .map(|(entity, _)| entity)
        .collect()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = engine();
    let mut engine_b = engine();
    engine_a.change_state(GameState::play_after(2));
    engine_b.change_state(GameState::play_after(2));

    for _ in 0..900 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_invalid_config_rejected() {
    let mut game = GameConfig::default();
    game.enemy.attack_speed = 0.0;
    let result = SimulationEngine::new(SimConfig {
        game,
        ..Default::default()
    });
    assert!(result.is_err());
}

#[test]
fn test_pause_stops_simulation() {
    let mut engine = engine();
    engine.tick();
    engine.queue_command(PlayerCommand::Pause);
    let paused = engine.tick();
    assert!(paused.paused);
    let frozen = engine.time().tick;
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, frozen);

    engine.queue_command(PlayerCommand::Resume);
    engine.tick();
    assert_eq!(engine.time().tick, frozen + 1);
}

#[test]
fn test_time_scale_is_clamped() {
    let mut engine = engine();
    engine.queue_command(PlayerCommand::SetTimeScale { scale: 50.0 });
    engine.tick();
    assert_eq!(engine.time_scale(), 4.0);
}

// ---- Progression ----

#[test]
fn test_starts_in_initial_with_action_subscription() {
    let engine = engine();
    assert_eq!(engine.state(), StateId::Initial);
    assert!(engine.session().bus.is_subscribed(Topic::Action));
    assert_eq!(engine.session().permits, Permits::default());
}

#[test]
fn test_transition_revokes_subscriptions() {
    let mut engine = engine();
    engine.change_state(GameState::loot(1));
    let bus = &engine.session().bus;
    assert!(!bus.is_subscribed(Topic::Action));
    assert!(bus.is_subscribed(Topic::Loot));
    assert_eq!(bus.len(), 1);
}

#[test]
fn test_immediate_transition_cancels_pending() {
    let mut engine = engine();
    engine.change_state_after(GameState::loot(1), 1.0);
    assert_eq!(engine.machine().pending().map(|(id, _)| id), Some(StateId::Loot));

    engine.change_state(GameState::play_after(1));
    assert_eq!(engine.state(), StateId::Play);
    assert!(engine.machine().pending().is_none());

    for _ in 0..120 {
        engine.tick();
    }
    assert_eq!(engine.state(), StateId::Play);
}

#[test]
fn test_delayed_transition_replaces_pending() {
    let mut engine = engine();
    engine.change_state_after(GameState::loot(1), 0.5);
    engine.change_state_after(GameState::loot(3), 1.0);
    assert_eq!(engine.machine().pending(), Some((StateId::Loot, 1.0)));

    for _ in 0..50 {
        engine.tick();
    }
    assert_eq!(engine.state(), StateId::Initial);

    run_until(&mut engine, 30, |e| e.state() == StateId::Loot);
    assert_eq!(engine.machine().current().level(), Some(3));
}

#[test]
fn test_terminal_state_refuses_requests() {
    let mut engine = engine();
    engine.change_state(GameState::defeat());
    assert_eq!(engine.state(), StateId::Defeat);

    engine.change_state(GameState::loot(1));
    engine.change_state_after(GameState::victory(), 0.1);
    assert_eq!(engine.state(), StateId::Defeat);
    assert!(engine.machine().pending().is_none());
}

#[test]
fn test_restart_from_defeat() {
    let mut engine = engine();
    engine.change_state(GameState::play_after(1));
    damage::modify_nexus_health(engine.session_mut(), -30.0);
    engine.change_state(GameState::defeat());

    // Clicks are ignored until the screen arms.
    let early = click(&mut engine, Position::ORIGIN);
    assert_eq!(early.state, StateId::Defeat);

    run_until(&mut engine, 120, |e| e.session().bus.is_subscribed(Topic::Action));
    let snapshot = click(&mut engine, Position::ORIGIN);
    assert_eq!(snapshot.state, StateId::Initial);
    assert_eq!(snapshot.nexus.current_health, snapshot.nexus.maximum_health);
    assert!(snapshot.enemies.is_empty());
}

#[test]
fn test_loot_deploy_play_permits() {
    let mut engine = engine();
    engine.change_state(GameState::loot(2));
    assert!(!engine.session().permits.action_input);

    engine.queue_command(PlayerCommand::ChooseLoot {
        button: LootButton::A,
    });
    let snapshot = engine.tick();
    assert_eq!(snapshot.state, StateId::Deploy);
    assert!(snapshot.permits.deployment);
    assert_eq!(snapshot.structures.len(), 1);
    assert!(!snapshot.structures[0].deployed);

    let target = Position::new(3.0, 2.0);
    let snapshot = click(&mut engine, target);
    assert_eq!(snapshot.state, StateId::Play);
    assert_eq!(snapshot.level, Some(3));
    assert_eq!(
        snapshot.permits,
        Permits {
            movement: true,
            action_input: true,
            direction_input: true,
            nexus_targeting: true,
            enemy_targeting: true,
            enemy_spawning: true,
            deployment: false,
        }
    );
    assert_eq!(
        engine.session().bus.topics().collect::<Vec<_>>(),
        vec![Topic::Enemy]
    );

    assert_eq!(snapshot.structures[0].kind, StructureKind::Cat);
    assert!(snapshot.structures[0].deployed);
    assert_eq!(snapshot.structures[0].position, target);
}

#[test]
fn test_loot_ignored_outside_loot_state() {
    let mut engine = engine();
    engine.queue_command(PlayerCommand::ChooseLoot {
        button: LootButton::B,
    });
    let snapshot = engine.tick();
    assert_eq!(snapshot.state, StateId::Initial);
}

#[test]
fn test_max_health_loot_scales_nexus() {
    let mut engine = engine();
    engine.change_state(GameState::loot(3));
    engine.queue_command(PlayerCommand::ChooseLoot {
        button: LootButton::A,
    });
    let snapshot = engine.tick();
    assert_eq!(snapshot.state, StateId::Play);
    assert_eq!(snapshot.level, Some(4));
    assert_eq!(snapshot.nexus.maximum_health, 150.0);
}

#[test]
fn test_enemy_modifier_loot_applies_to_new_spawns() {
    let mut engine = engine();
    engine.change_state(GameState::loot(4));
    engine.queue_command(PlayerCommand::ChooseLoot {
        button: LootButton::A,
    });
    let snapshot = engine.tick();
    assert_eq!(snapshot.modifiers.enemy_speed_multiplier, 1.5);

    run_until(&mut engine, 600, |e| !live_enemies(e).is_empty());
    let enemy = live_enemies(&engine)[0];
    let speed = engine
        .world()
        .get::<&UnitStats>(enemy)
        .unwrap()
        .speed;
    assert_eq!(speed, 1.5);
}

#[test]
fn test_deploy_click_on_nexus_does_not_heal() {
    let mut engine = engine();
    engine.change_state(GameState::play_after(1));
    engine.session_mut().set_player_position(Position::new(1.0, 0.0));
    let snapshot = engine.tick();
    assert!(snapshot.player.nexus_marked);

    engine.change_state(GameState::loot(2));
    assert!(!engine.session().permits.movement);
    engine.queue_command(PlayerCommand::ChooseLoot {
        button: LootButton::A,
    });
    let snapshot = engine.tick();
    assert_eq!(snapshot.state, StateId::Deploy);
    assert!(!snapshot.permits.movement);
    assert!(!snapshot.player.nexus_marked);

    let snapshot = click(&mut engine, Position::ORIGIN);
    assert_eq!(snapshot.state, StateId::Play);
    assert_eq!(snapshot.nexus.current_health, 100.0);
    let snapshots = [snapshot];
    assert_eq!(
        count_events(&snapshots, |e| matches!(e, GameEvent::NexusHealed { .. })),
        0
    );
    assert_eq!(
        count_events(&snapshots, |e| matches!(e, GameEvent::MarkerResolved { .. })),
        0
    );
}

// ---- Waves ----

#[test]
fn test_wave_spawns_capacity_at_cadence() {
    let mut game = GameConfig::default();
    game.nexus = NexusStats::new(100_000.0, 100_000.0);
    let mut engine = engine_with(game);
    engine.change_state(GameState::play_after(2));
    assert_eq!(engine.machine().current().level(), Some(3));

    let mut spawn_ticks = Vec::new();
    for _ in 0..(60 * 30) {
        let snapshot = engine.tick();
        for event in &snapshot.events {
            if matches!(event, GameEvent::EnemySpawned { .. }) {
                spawn_ticks.push(snapshot.time.tick);
            }
        }
    }

    assert_eq!(spawn_ticks.len(), 5);
    for pair in spawn_ticks.windows(2) {
        let spacing = pair[1] - pair[0];
        assert!((179..=181).contains(&spacing), "spacing {spacing}");
    }
    // The grace period delays the first spawn past one cadence.
    assert!(spawn_ticks[0] > 290);
}

#[test]
fn test_level_complete_fires_once() {
    let mut engine = engine();
    engine.change_state(GameState::play_after(1));

    run_until(&mut engine, 60 * 20, |e| live_enemies(e).len() == 3);

    let mut snapshots = Vec::new();
    for enemy in live_enemies(&engine) {
        damage::damage_enemy(engine.session_mut(), enemy, 1_000.0);
        // Fleeing enemies ignore further damage.
        let again = damage::damage_enemy(engine.session_mut(), enemy, 1_000.0);
        assert_eq!(again, Some(nexus_combat::damage::DamageOutcome::Ignored));
        snapshots.push(engine.tick());
    }
    snapshots.extend(run_until(&mut engine, 200, |e| e.state() == StateId::Loot));

    assert_eq!(
        count_events(&snapshots, |e| matches!(e, GameEvent::LevelComplete { level: 2 })),
        1
    );
    assert_eq!(engine.machine().current().level(), Some(2));
}

#[test]
fn test_final_level_leads_to_victory() {
    let mut game = GameConfig::default();
    for wave in game.waves.iter_mut() {
        wave.capacity = 1;
    }
    let mut engine = engine_with(game);
    engine.change_state(GameState::play_after(6));

    // One enemy over the whole final wave: it arrives after grace plus the full duration.
    run_until(&mut engine, 60 * 40, |e| live_enemies(e).len() == 1);
    let enemy = live_enemies(&engine)[0];
    damage::damage_enemy(engine.session_mut(), enemy, 1_000.0);
    run_until(&mut engine, 200, |e| e.state() == StateId::Victory);
}

// ---- Nexus ----

#[test]
fn test_nexus_depletion_defeats_once() {
    let mut engine = engine();
    engine.change_state(GameState::play_after(1));
    engine.tick();

    for _ in 0..3 {
        damage::modify_nexus_health(engine.session_mut(), -20.0);
    }
    assert_eq!(engine.session().nexus_stats().current_health, 40.0);
    let snapshot = engine.tick();
    assert_eq!(snapshot.state, StateId::Play);

    damage::modify_nexus_health(engine.session_mut(), -50.0);
    assert_eq!(engine.session().nexus_stats().current_health, -10.0);
    damage::modify_nexus_health(engine.session_mut(), -50.0);

    let mut snapshots = vec![engine.tick()];
    damage::modify_nexus_health(engine.session_mut(), -5.0);
    for _ in 0..30 {
        snapshots.push(engine.tick());
    }

    assert_eq!(engine.state(), StateId::Defeat);
    let defeats = count_events(&snapshots, |e| {
        matches!(
            e,
            GameEvent::StateChanged {
                to: StateId::Defeat,
                ..
            }
        )
    });
    assert_eq!(defeats, 1);
}

#[test]
fn test_heal_can_overfill() {
    let mut engine = engine();
    damage::modify_nexus_health(engine.session_mut(), -30.0);
    damage::modify_nexus_health(engine.session_mut(), 50.0);
    let nexus = engine.session().nexus_stats();
    assert_eq!(nexus.current_health, 120.0);
    assert_eq!(nexus.maximum_health, 100.0);
}

#[test]
fn test_enemies_strike_the_nexus() {
    let mut engine = engine();
    engine.change_state(GameState::play_after(1));
    let snapshots = run_until(&mut engine, 60 * 30, |e| {
        e.session().nexus_stats().current_health < 100.0
    });
    assert!(count_events(&snapshots, |e| matches!(e, GameEvent::NexusDamaged { .. })) >= 1);
}

// ---- Damage ----

#[test]
fn test_surviving_enemy_is_stunned() {
    let mut engine = engine();
    engine.change_state(GameState::play_after(1));
    run_until(&mut engine, 60 * 10, |e| !live_enemies(e).is_empty());
    let enemy = live_enemies(&engine)[0];

    damage::damage_enemy(engine.session_mut(), enemy, 10.0);
    let activity = *engine.world().get::<&EnemyActivity>(enemy).unwrap();
    assert!(matches!(activity, EnemyActivity::Stunned(_)));

    let before = *engine.world().get::<&Position>(enemy).unwrap();
    for _ in 0..30 {
        engine.tick();
    }
    let after = *engine.world().get::<&Position>(enemy).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_defeated_enemy_flees_and_is_released() {
    let mut engine = engine();
    engine.change_state(GameState::play_after(1));
    run_until(&mut engine, 60 * 10, |e| !live_enemies(e).is_empty());
    let enemy = live_enemies(&engine)[0];

    damage::damage_enemy(engine.session_mut(), enemy, 1_000.0);
    let state = *engine.world().get::<&EnemyState>(enemy).unwrap();
    assert!(state.fleeing);

    let snapshots = run_until(&mut engine, 60 * 10, |e| !e.world().contains(enemy));
    assert_eq!(
        count_events(&snapshots, |e| matches!(e, GameEvent::EnemyFled { .. })),
        1
    );
}

fn arrow_at(engine: &mut SimulationEngine, from: Position, target: Entity, aim: Position) -> Entity {
    let travel = Travel::at_speed(from, aim, ARROW_SPEED);
    engine.session_mut().world.spawn((from, Arrow { target, travel }))
}

#[test]
fn test_arrow_landing_on_fleeing_enemy_does_nothing() {
    let mut engine = engine();
    engine.change_state(GameState::play_after(1));
    run_until(&mut engine, 60 * 10, |e| !live_enemies(e).is_empty());
    let enemy = live_enemies(&engine)[0];
    let spot = Position::new(2.0, 0.0);
    *engine.session_mut().world.get::<&mut Position>(enemy).unwrap() = spot;

    let arrow = arrow_at(&mut engine, Position::new(4.0, 0.0), enemy, spot);
    damage::damage_enemy(engine.session_mut(), enemy, 1_000.0);
    let health = engine.world().get::<&UnitStats>(enemy).unwrap().health;
    engine.session_mut().take_events();

    let snapshots = run_until(&mut engine, 120, |e| !e.world().contains(arrow));
    assert!(!snapshots.is_empty());
    assert_eq!(
        count_events(&snapshots, |e| matches!(
            e,
            GameEvent::EnemyDamaged { .. } | GameEvent::EnemyDefeated { .. }
        )),
        0
    );
    assert!(engine.world().contains(enemy));
    assert_eq!(engine.world().get::<&UnitStats>(enemy).unwrap().health, health);
}

#[test]
fn test_arrow_without_target_is_removed() {
    let mut engine = engine();
    engine.change_state(GameState::play_after(1));
    let gone = engine.session_mut().world.spawn((Position::new(3.0, 0.0),));
    engine.session_mut().world.despawn(gone).unwrap();

    let arrow = arrow_at(&mut engine, Position::ORIGIN, gone, Position::new(3.0, 0.0));
    let snapshot = engine.tick();
    assert!(!engine.world().contains(arrow));
    assert!(snapshot.projectiles.is_empty());
}

// ---- Structures ----

fn place(engine: &mut SimulationEngine, loot_level: u32, button: LootButton, at: Position) {
    engine.change_state(GameState::loot(loot_level));
    engine.queue_command(PlayerCommand::ChooseLoot { button });
    engine.tick();
    click(engine, at);
    assert_eq!(engine.state(), StateId::Play);
}

#[test]
fn test_tower_shoots_enemy_in_range() {
    let mut engine = engine();
    // Loot 1, button A: tower, right above the nexus.
    place(&mut engine, 1, LootButton::A, Position::new(0.0, 1.0));

    let snapshots: Vec<_> = (0..60 * 25).map(|_| engine.tick()).collect();
    let shots = snapshots
        .iter()
        .flat_map(|s| s.presentation.iter())
        .filter(|p| {
            matches!(
                p,
                nexus_core::events::PresentationEvent::PlayEffect {
                    kind: EffectKind::ArrowShot,
                    ..
                }
            )
        })
        .count();
    assert!(shots >= 1);
    assert!(count_events(&snapshots, |e| matches!(e, GameEvent::EnemyDamaged { .. })) >= 1);
}

#[test]
fn test_dog_has_no_hit_box_and_wanders() {
    let mut engine = engine();
    // Loot 2, button B: dog.
    place(&mut engine, 2, LootButton::B, Position::new(-3.0, -3.0));

    let hitbox_enabled = {
        let mut query = engine
            .world()
            .query::<(&Structure, &nexus_core::components::HitBox)>();
        query.iter().all(|(_, (_, hitbox))| hitbox.enabled)
    };
    assert!(!hitbox_enabled);

    for _ in 0..60 {
        engine.tick();
    }
    let snapshot = engine.tick();
    assert_ne!(snapshot.structures[0].position, Position::new(-3.0, -3.0));
}

#[test]
fn test_dog_keeps_walking_while_cooling_down() {
    let mut engine = engine();
    place(&mut engine, 2, LootButton::B, Position::new(-3.0, -3.0));
    let dog = {
        let mut query = engine.world().query::<&Structure>();
        query.iter().map(|(entity, _)| entity).next().unwrap()
    };
    *engine.session_mut().world.get::<&mut StructureBrain>(dog).unwrap() = StructureBrain::Dog {
        cooldown: Cooldown::new(DOG_CYCLE_SECS),
        target: None,
        wander: Some(DirectMove::new(Position::new(-3.0, 3.0), DOG_SPEED)),
        lunge: None,
    };
    let stats = engine.session().config.enemy;
    let enemy = world_setup::spawn_enemy(
        engine.session_mut(),
        Position::new(-3.0, -2.5),
        stats,
        EnemyActivity::Holding,
    );

    let before = *engine.world().get::<&Position>(dog).unwrap();
    systems::structures::run(engine.session_mut(), DT);

    let brain = (*engine.world().get::<&StructureBrain>(dog).unwrap()).clone();
    let StructureBrain::Dog { target, lunge, .. } = brain else {
        panic!("not a dog");
    };
    assert_eq!(target, Some(enemy));
    assert!(lunge.is_none());
    let after = *engine.world().get::<&Position>(dog).unwrap();
    assert!(after.y > before.y);
}

#[test]
fn test_shed_boosts_player_speed_nearby() {
    let mut engine = engine();
    // Loot 1, button B: shed.
    place(&mut engine, 1, LootButton::B, Position::new(-9.0, 0.0));

    let snapshot = engine.tick();
    assert_eq!(snapshot.player.speed, 6.0);

    engine.session_mut().set_player_position(Position::new(0.0, 0.0));
    let snapshot = engine.tick();
    assert_eq!(snapshot.player.speed, 3.0);
}

// ---- Tutorial ----

fn press(engine: &mut SimulationEngine, direction: Direction) {
    engine.queue_command(PlayerCommand::Input {
        event: InputEvent::DirectionStarted { direction },
    });
}

fn lift(engine: &mut SimulationEngine, direction: Direction) {
    engine.queue_command(PlayerCommand::Input {
        event: InputEvent::DirectionEnded { direction },
    });
}

#[test]
fn test_tutorial_walkthrough() {
    let mut engine = engine();

    // Title card: the first click leaves after a short delay.
    click_when_ready(&mut engine, Position::ORIGIN);
    run_until(&mut engine, 60, |e| e.state() == StateId::InitialMovement);
    run_until(&mut engine, 240, |e| e.state() == StateId::InitialDialogue);
    assert_eq!(engine.session().player_position(), Position::new(-5.5, 0.0));

    for _ in 0..3 {
        click_when_ready(&mut engine, Position::ORIGIN);
    }
    assert_eq!(engine.state(), StateId::InitialStep);

    press(&mut engine, Direction::Right);
    run_until(&mut engine, 240, |e| e.state() == StateId::SecondStep);
    lift(&mut engine, Direction::Right);
    let snapshot = engine.tick();
    assert!(snapshot.player.nexus_marked);

    let snapshot = click(&mut engine, Position::ORIGIN);
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::MarkerResolved { kind: MarkerKind::Nexus })));

    run_until(&mut engine, 60, |e| e.state() == StateId::SecondMovement);
    run_until(&mut engine, 60 * 6, |e| e.state() == StateId::SecondDialogue);
    let snapshot = engine.tick();
    assert_eq!(snapshot.enemies.len(), 1);
    assert_eq!(snapshot.enemies[0].phase, UnitPhase::Idle);

    for _ in 0..2 {
        click_when_ready(&mut engine, Position::ORIGIN);
    }
    assert_eq!(engine.state(), StateId::ThirdStep);

    // Let the enemy reach the nexus, then walk up to it.
    for _ in 0..(60 * 5) {
        engine.tick();
    }
    press(&mut engine, Direction::Right);
    run_until(&mut engine, 240, |e| {
        e.world()
            .get::<&crate::tasks::Markers>(e.session().actors.player)
            .map(|m| !m.enemies.is_empty())
            .unwrap_or(false)
    });
    lift(&mut engine, Direction::Right);
    let snapshot = engine.tick();
    assert_eq!(snapshot.player.marked_enemies.len(), 1);

    let enemy = snapshot.enemies[0].position;
    let first = click(&mut engine, enemy);
    assert!(first
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::EnemyDamaged { .. })));

    run_until(&mut engine, 120, |e| {
        e.session().permits.movement && e.session().permits.action_input
    });
    let snapshot = engine.tick();
    let second = click(&mut engine, snapshot.enemies[0].position);
    assert!(second
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::EnemyDefeated { .. })));

    run_until(&mut engine, 200, |e| e.state() == StateId::Loot);
    assert_eq!(engine.machine().current().level(), Some(1));
}
