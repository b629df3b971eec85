//! Cleanup system: releases fleeing enemies that have left the field.

use nexus_core::components::{Enemy, EnemyState};
use nexus_core::constants::{FLEE_BOUND_X, FLEE_BOUND_Y};
use nexus_core::events::GameEvent;
use nexus_core::types::Position;

use crate::session::Session;

/// Uses the session's despawn buffer to avoid per-tick allocation.
pub fn run(session: &mut Session) {
    let mut buffer = std::mem::take(&mut session.despawn_buffer);
    buffer.clear();

    for (entity, (_, pos, state)) in session
        .world
        .query_mut::<(&Enemy, &Position, &EnemyState)>()
    {
        if state.fleeing && (pos.x.abs() >= FLEE_BOUND_X || pos.y.abs() >= FLEE_BOUND_Y) {
            buffer.push(entity);
        }
    }

    for entity in buffer.drain(..) {
        if session.world.despawn(entity).is_ok() {
            session.emit(GameEvent::EnemyFled {
                entity: entity.to_bits().get(),
            });
        }
    }
    session.despawn_buffer = buffer;
}
