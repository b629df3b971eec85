//! Player unit: direction input, bounded movement, scripted walks,
//! engagement markers and marker clicks.

use hecs::Entity;

use nexus_combat::melee::release_delay;
use nexus_combat::tasks::TaskStatus;
use nexus_core::commands::InputEvent;
use nexus_core::components::{Enemy, EnemyState, HitBox, SpawnOrder};
use nexus_core::constants::*;
use nexus_core::enums::{EffectKind, MarkerKind};
use nexus_core::events::GameEvent;
use nexus_core::models::UnitStats;
use nexus_core::types::Position;

use crate::session::Session;
use crate::systems::damage;
use crate::tasks::{Markers, PlayerControl};

/// Direction key press or release. Ignored unless the player is controllable.
pub fn handle_direction(session: &mut Session, event: InputEvent) {
    if !session.permits.movement {
        return;
    }
    let Ok(mut control) = session.world.get::<&mut PlayerControl>(session.actors.player) else {
        return;
    };
    match event {
        InputEvent::DirectionStarted { direction } => control.press(direction),
        InputEvent::DirectionEnded { direction } => control.lift(direction),
        _ => {}
    }
}

/// Pointer press. Resolves the marker whose target's hit box contains the
/// click, if the player may act.
pub fn handle_action(session: &mut Session, event: InputEvent) {
    let InputEvent::ActionStarted { position } = event else {
        return;
    };
    if !session.permits.movement {
        return;
    }
    let Some((kind, target)) = marker_at(session, position) else {
        return;
    };

    let stats = session.player_stats();
    session.lock_player(release_delay(stats.attack_speed) + PLAYER_RELEASE_PADDING_SECS);
    session.suspend_action_input(release_delay(stats.attack_speed));

    if let Ok(mut markers) = session.world.get::<&mut Markers>(session.actors.player) {
        match kind {
            MarkerKind::Nexus => markers.nexus = false,
            MarkerKind::Enemy => markers.enemies.retain(|&e| e != target),
        }
    }

    match kind {
        MarkerKind::Nexus => damage::modify_nexus_health(session, stats.health),
        MarkerKind::Enemy => {
            damage::damage_enemy(session, target, stats.damage);
        }
    }
    session.play_effect(EffectKind::Click, position);
    session.emit(GameEvent::MarkerResolved { kind });
}

fn marker_at(session: &Session, click: Position) -> Option<(MarkerKind, Entity)> {
    let markers = {
        let markers = session.world.get::<&Markers>(session.actors.player).ok()?;
        Markers::clone(&markers)
    };

    let contains = |entity: Entity| -> bool {
        match session.world.query_one::<(&Position, &HitBox)>(entity) {
            Ok(mut query) => query
                .get()
                .map(|(pos, hitbox)| hitbox.enabled && click.is_within_box(pos, hitbox.half_extent))
                .unwrap_or(false),
            Err(_) => false,
        }
    };

    if markers.nexus && contains(session.actors.nexus) {
        return Some((MarkerKind::Nexus, session.actors.nexus));
    }
    markers
        .enemies
        .iter()
        .copied()
        .find(|&enemy| contains(enemy))
        .map(|enemy| (MarkerKind::Enemy, enemy))
}

/// Per-tick movement, control release and marker refresh.
pub fn run(session: &mut Session, dt: f32) {
    let controllable = session.permits.movement;
    let mut regained = false;

    if let Ok((pos, stats, control)) = session
        .world
        .query_one_mut::<(&mut Position, &UnitStats, &mut PlayerControl)>(session.actors.player)
    {
        if let Some(script) = control.script {
            if script.advance(pos, dt) == TaskStatus::Finished {
                control.script = None;
            }
        } else if controllable {
            let direction = control.direction();
            if direction != glam::Vec2::ZERO {
                let next = pos.offset(direction.normalize(), stats.speed * dt);
                if next.x.abs() < PLAYER_BOUND_X && next.y.abs() < PLAYER_BOUND_Y {
                    *pos = next;
                }
            }
        }

        if let Some(release) = control.release.as_mut() {
            if release.advance(dt) == TaskStatus::Finished {
                control.release = None;
                regained = true;
            }
        }
    }

    if regained {
        session.permits.movement = true;
    }

    refresh_markers(session);
}

/// Mark the nexus and nearby non-fleeing enemies when their checks are on.
fn refresh_markers(session: &mut Session) {
    let player = session.player_position();

    let nexus = session.permits.nexus_targeting
        && player.range_to(&session.nexus_position()) < PLAYER_NEXUS_RANGE;

    let mut enemies: Vec<(SpawnOrder, Entity)> = Vec::new();
    if session.permits.enemy_targeting {
        let mut query = session
            .world
            .query::<(&Enemy, &Position, &EnemyState, &SpawnOrder)>();
        for (entity, (_, pos, state, order)) in query.iter() {
            if !state.fleeing && player.range_to(pos) < PLAYER_ENEMY_RANGE {
                enemies.push((*order, entity));
            }
        }
    }
    enemies.sort_by_key(|(order, _)| *order);

    if let Ok(mut markers) = session.world.get::<&mut Markers>(session.actors.player) {
        markers.nexus = nexus;
        markers.enemies = enemies.into_iter().map(|(_, e)| e).collect();
    }
}
