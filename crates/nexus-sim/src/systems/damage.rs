//! Damage entry points shared by the player, structures and enemies.

use glam::Vec2;
use hecs::Entity;

use nexus_combat::damage::{apply_damage, DamageOutcome};
use nexus_combat::tasks::Lockout;
use nexus_core::components::{EnemyState, HitBox};
use nexus_core::enums::EffectKind;
use nexus_core::events::GameEvent;
use nexus_core::models::{NexusStats, UnitStats};
use nexus_core::types::Position;

use crate::progression::GameState;
use crate::session::Session;
use crate::tasks::EnemyActivity;

/// Damage an enemy. Returns `None` if the entity is gone.
///
/// A surviving enemy is interrupted and stunned; a defeated one loses its
/// hit box and starts fleeing directly away from the nexus.
pub fn damage_enemy(session: &mut Session, entity: Entity, amount: f32) -> Option<DamageOutcome> {
    let stun_secs = session.config.hit_stun_secs;
    let nexus = session.nexus_position();

    let (outcome, position) = {
        let (stats, state, activity, hitbox, position) = session
            .world
            .query_one_mut::<(
                &mut UnitStats,
                &mut EnemyState,
                &mut EnemyActivity,
                &mut HitBox,
                &Position,
            )>(entity)
            .ok()?;

        let outcome = apply_damage(stats, state.fleeing, amount);
        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Damaged { .. } => {
                *activity = EnemyActivity::Stunned(Lockout::new(stun_secs));
            }
            DamageOutcome::Defeated => {
                hitbox.enabled = false;
                state.fleeing = true;
                let away = nexus.direction_to(position);
                let direction = if away == Vec2::ZERO { Vec2::X } else { away };
                *activity = EnemyActivity::Fleeing { direction };
            }
        }
        (outcome, *position)
    };

    let id = entity.to_bits().get();
    match outcome {
        DamageOutcome::Ignored => {}
        DamageOutcome::Damaged { remaining } => {
            session.play_effect(EffectKind::Blood, position);
            session.emit(GameEvent::EnemyDamaged {
                entity: id,
                remaining,
            });
        }
        DamageOutcome::Defeated => {
            log::debug!("enemy {id} defeated at ({:.2}, {:.2})", position.x, position.y);
            session.play_effect(EffectKind::Blood, position);
            session.play_effect(EffectKind::RunAway, position);
            session.emit(GameEvent::EnemyDefeated { entity: id });
        }
    }
    Some(outcome)
}

/// Change the nexus's current health. Depletion requests defeat regardless of
/// the live state; the machine drops repeats once defeat is live.
pub fn modify_nexus_health(session: &mut Session, delta: f32) {
    let (current, depleted) = {
        let Ok(mut nexus) = session.world.get::<&mut NexusStats>(session.actors.nexus) else {
            return;
        };
        nexus.modify_current_health(delta);
        (nexus.current_health, nexus.is_depleted())
    };
    let position = session.nexus_position();

    if delta > 0.0 {
        session.play_effect(EffectKind::NexusHeal, position);
        session.emit(GameEvent::NexusHealed {
            amount: delta,
            current,
        });
    } else if delta < 0.0 {
        session.play_effect(EffectKind::NexusHurt, position);
        session.emit(GameEvent::NexusDamaged {
            amount: -delta,
            remaining: current,
        });
    }

    if depleted {
        session.change_state(GameState::defeat());
    }
}
