//! Enemy behavior: home on the nexus, strike on contact, recover, flee when defeated.

use nexus_combat::melee::{pursue, release_delay, ContactStep};
use nexus_combat::tasks::{Lockout, TaskStatus};
use nexus_core::components::{Enemy, EnemyState};
use nexus_core::constants::{ENEMY_CONTACT_RANGE, FLEE_SPEED_FACTOR};
use nexus_core::models::UnitStats;
use nexus_core::types::Position;

use crate::session::Session;
use crate::systems::damage;
use crate::tasks::EnemyActivity;

pub fn run(session: &mut Session, dt: f32) {
    let nexus = session.nexus_position();
    let mut strikes: Vec<f32> = Vec::new();

    for (_, (_, pos, stats, state, activity)) in session.world.query_mut::<(
        &Enemy,
        &mut Position,
        &UnitStats,
        &EnemyState,
        &mut EnemyActivity,
    )>() {
        *activity = match *activity {
            EnemyActivity::Approach => {
                match pursue(*pos, nexus, ENEMY_CONTACT_RANGE, stats.speed, dt) {
                    ContactStep::Advance(next) => {
                        *pos = next;
                        EnemyActivity::Approach
                    }
                    ContactStep::Strike => {
                        strikes.push(stats.damage);
                        EnemyActivity::Recovering(Lockout::new(release_delay(stats.attack_speed)))
                    }
                }
            }
            EnemyActivity::Scripted(walk) => match walk.advance(pos, dt) {
                TaskStatus::Running => EnemyActivity::Scripted(walk),
                TaskStatus::Finished => resume(state),
            },
            EnemyActivity::Holding => resume(state),
            EnemyActivity::Recovering(mut lock) => match lock.advance(dt) {
                TaskStatus::Running => EnemyActivity::Recovering(lock),
                TaskStatus::Finished => resume(state),
            },
            EnemyActivity::Stunned(mut lock) => match lock.advance(dt) {
                TaskStatus::Running => EnemyActivity::Stunned(lock),
                TaskStatus::Finished => resume(state),
            },
            EnemyActivity::Fleeing { direction } => {
                *pos = pos.offset(direction, stats.speed * FLEE_SPEED_FACTOR * dt);
                EnemyActivity::Fleeing { direction }
            }
        };
    }

    for amount in strikes {
        damage::modify_nexus_health(session, -amount);
    }
}

/// What an enemy does once it is free to act again.
fn resume(state: &EnemyState) -> EnemyActivity {
    if state.held {
        EnemyActivity::Holding
    } else {
        EnemyActivity::Approach
    }
}
