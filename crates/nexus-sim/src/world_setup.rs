//! Entity spawn factories for the simulation world.
//!
//! Creates the nexus, the player unit, enemies and structures with their
//! component bundles, and samples enemy spawn points.

use hecs::{Entity, World};
use rand::Rng;

use nexus_combat::tasks::DirectMove;
use nexus_core::components::*;
use nexus_core::config::GameConfig;
use nexus_core::constants::*;
use nexus_core::enums::StructureKind;
use nexus_core::events::GameEvent;
use nexus_core::models::UnitStats;
use nexus_core::types::Position;

use crate::los::{self, BoxShape};
use crate::session::{Actors, Session};
use crate::tasks::{EnemyActivity, Markers, PlayerControl, StructureBrain};

/// Populate an empty world with the entities that live for the whole session.
pub fn setup_session(world: &mut World, config: &GameConfig) -> Actors {
    Actors {
        nexus: spawn_nexus(world, config),
        player: spawn_player(world, config),
    }
}

pub fn spawn_nexus(world: &mut World, config: &GameConfig) -> Entity {
    world.spawn((
        Nexus,
        Position::ORIGIN,
        config.nexus,
        HitBox {
            half_extent: HIT_BOX_HALF_EXTENT,
            enabled: true,
        },
    ))
}

/// The player unit starts off screen to the left.
pub fn spawn_player(world: &mut World, config: &GameConfig) -> Entity {
    world.spawn((
        Player,
        Position::new(PLAYER_START_X, 0.0),
        config.player,
        PlayerControl::default(),
        Markers::default(),
    ))
}

/// Spawn an enemy with the given stats and initial activity.
pub fn spawn_enemy(
    session: &mut Session,
    position: Position,
    stats: UnitStats,
    activity: EnemyActivity,
) -> Entity {
    let order = session.next_spawn_order();
    let entity = session.world.spawn((
        Enemy,
        position,
        stats,
        EnemyState::default(),
        HitBox {
            half_extent: HIT_BOX_HALF_EXTENT,
            enabled: true,
        },
        order,
        activity,
    ));
    session.emit(GameEvent::EnemySpawned {
        entity: entity.to_bits().get(),
        position,
    });
    entity
}

/// Spawn one wave enemy at a sampled edge position, with the session modifiers applied.
pub fn spawn_wave_enemy(session: &mut Session) -> Entity {
    let position = sample_spawn_position(session);
    let mut stats = session.config.enemy;
    session.modifiers.apply_to(&mut stats);
    spawn_enemy(session, position, stats, EnemyActivity::Approach)
}

/// Spawn the scripted tutorial enemy: walks in from the right and holds.
/// Returns the entity and the walk duration.
pub fn spawn_tutorial_enemy(session: &mut Session) -> (Entity, f32) {
    let start = Position::new(TUTORIAL_ENEMY_START_X, 0.0);
    let stats = session.config.enemy;
    let walk = DirectMove::new(Position::new(TUTORIAL_ENEMY_STOP_X, 0.0), stats.speed);
    let duration = walk.duration_from(start);
    let entity = spawn_enemy(session, start, stats, EnemyActivity::Scripted(walk));
    if let Ok(mut state) = session.world.get::<&mut EnemyState>(entity) {
        state.held = true;
    }
    (entity, duration)
}

/// Spawn an undeployed structure under the cursor. It has no active hit box.
pub fn spawn_structure_preview(session: &mut Session, kind: StructureKind) -> Entity {
    let order = session.next_spawn_order();
    session.world.spawn((
        Structure {
            kind,
            deployed: false,
        },
        session.cursor,
        HitBox {
            half_extent: HIT_BOX_HALF_EXTENT,
            enabled: false,
        },
        StructureBrain::for_kind(kind),
        order,
    ))
}

/// Fix a previewed structure at `position` and switch on its behavior.
pub fn deploy_structure(session: &mut Session, entity: Entity, position: Position) {
    let Ok((structure, pos, hitbox)) = session
        .world
        .query_one_mut::<(&mut Structure, &mut Position, &mut HitBox)>(entity)
    else {
        return;
    };
    structure.deployed = true;
    *pos = position;
    hitbox.enabled = structure.kind != StructureKind::Dog;
    let kind = structure.kind;
    session.emit(GameEvent::StructureDeployed { kind, position });
}

/// Hit boxes of deployed solid structures.
pub fn solid_obstacles(world: &World) -> Vec<BoxShape> {
    let mut query = world.query::<(&Structure, &Position, &HitBox)>();
    query
        .iter()
        .filter(|(_, (structure, _, hitbox))| structure.deployed && hitbox.enabled)
        .map(|(_, (_, position, hitbox))| BoxShape {
            center: *position,
            half_extent: hitbox.half_extent,
        })
        .collect()
}

/// Sample a spawn point outside the arena whose straight path to the nexus is clear.
///
/// Gives up after a fixed number of attempts and uses the last sample.
pub fn sample_spawn_position(session: &mut Session) -> Position {
    let obstacles = solid_obstacles(&session.world);
    let target = BoxShape {
        center: session.nexus_position(),
        half_extent: HIT_BOX_HALF_EXTENT,
    };

    let mut position = Position::ORIGIN;
    for _ in 0..SPAWN_PROBE_ATTEMPTS {
        position = sample_edge_point(&mut session.rng);
        if los::has_line_of_sight(position, SPAWN_PROBE_LENGTH, &target, &obstacles) {
            return position;
        }
    }
    log::warn!(
        "no clear spawn path after {SPAWN_PROBE_ATTEMPTS} attempts, using ({:.2}, {:.2})",
        position.x,
        position.y
    );
    position
}

fn sample_edge_point(rng: &mut impl Rng) -> Position {
    let mut x = rng.gen_range(SPAWN_X_MIN..SPAWN_X_MAX);
    if rng.gen_bool(0.5) {
        x = -x;
    }
    let mut y = rng.gen_range(SPAWN_Y_MIN..SPAWN_Y_MAX);
    if rng.gen_bool(0.5) {
        y = -y;
    }
    Position::new(x, y)
}
