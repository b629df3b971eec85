//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! The world is only read. The session's outgoing event queues are drained
//! into the snapshot.

use hecs::World;

use nexus_core::components::*;
use nexus_core::enums::UnitPhase;
use nexus_core::models::UnitStats;
use nexus_core::state::*;
use nexus_core::types::{Position, SimTime};

use crate::progression::StateMachine;
use crate::session::Session;
use crate::tasks::{Arrow, EnemyActivity, Markers, PlayerControl};

/// Build a complete GameStateSnapshot from the current session.
pub fn build_snapshot(
    session: &mut Session,
    machine: &StateMachine,
    time: SimTime,
    paused: bool,
) -> GameStateSnapshot {
    let nexus = session.nexus_stats();
    GameStateSnapshot {
        time,
        state: machine.id(),
        level: machine.current().level(),
        paused,
        nexus: NexusView {
            current_health: nexus.current_health,
            maximum_health: nexus.maximum_health,
        },
        player: build_player(session),
        enemies: build_enemies(&session.world),
        structures: build_structures(&session.world),
        projectiles: build_projectiles(&session.world),
        wave: machine.current().wave(),
        permits: session.permits,
        modifiers: session.modifiers,
        events: session.take_events(),
        presentation: session.take_presentation(),
    }
}

fn build_player(session: &Session) -> PlayerView {
    let Ok(mut query) = session
        .world
        .query_one::<(&Position, &UnitStats, &PlayerControl, &Markers)>(session.actors.player)
    else {
        return PlayerView::default();
    };
    let Some((pos, stats, control, markers)) = query.get() else {
        return PlayerView::default();
    };

    let phase = if control.release.is_some() {
        UnitPhase::Engaging
    } else if control.script.is_some() || control.moving != 0 {
        UnitPhase::Approaching
    } else if !session.permits.movement {
        UnitPhase::Disabled
    } else {
        UnitPhase::Idle
    };

    PlayerView {
        position: *pos,
        phase,
        speed: stats.speed,
        damage: stats.damage,
        nexus_marked: markers.nexus,
        marked_enemies: markers.enemies.iter().map(|e| e.to_bits().get()).collect(),
    }
}

/// Enemies in spawn order.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut query = world.query::<(
        &Enemy,
        &Position,
        &UnitStats,
        &EnemyState,
        &EnemyActivity,
        &SpawnOrder,
    )>();
    let mut enemies: Vec<(SpawnOrder, EnemyView)> = query
        .iter()
        .map(|(entity, (_, pos, stats, state, activity, order))| {
            (
                *order,
                EnemyView {
                    entity: entity.to_bits().get(),
                    position: *pos,
                    health: stats.health,
                    phase: activity.phase(),
                    fleeing: state.fleeing,
                },
            )
        })
        .collect();
    enemies.sort_by_key(|(order, _)| *order);
    enemies.into_iter().map(|(_, view)| view).collect()
}

/// Structures in spawn order.
fn build_structures(world: &World) -> Vec<StructureView> {
    let mut query = world.query::<(&Structure, &Position, &SpawnOrder)>();
    let mut structures: Vec<(SpawnOrder, StructureView)> = query
        .iter()
        .map(|(_, (structure, pos, order))| {
            (
                *order,
                StructureView {
                    kind: structure.kind,
                    position: *pos,
                    deployed: structure.deployed,
                },
            )
        })
        .collect();
    structures.sort_by_key(|(order, _)| *order);
    structures.into_iter().map(|(_, view)| view).collect()
}

fn build_projectiles(world: &World) -> Vec<Position> {
    let mut query = world.query::<(&Arrow, &Position)>();
    let mut arrows: Vec<(u64, Position)> = query
        .iter()
        .map(|(entity, (_, pos))| (entity.to_bits().get(), *pos))
        .collect();
    arrows.sort_by_key(|(id, _)| *id);
    arrows.into_iter().map(|(_, pos)| pos).collect()
}
