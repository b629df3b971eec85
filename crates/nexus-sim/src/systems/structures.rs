//! Deployed structure behavior: tower volleys, dog lunges and wandering,
//! shed speed auras. Undeployed previews track the cursor.

use hecs::Entity;
use rand::Rng;

use nexus_combat::targeting::{acquire_nearest, still_in_range, Candidate};
use nexus_combat::tasks::{DirectMove, Lunge, LungeStep, TaskStatus, Travel};
use nexus_core::components::{Enemy, EnemyState, SpawnOrder, Structure};
use nexus_core::constants::*;
use nexus_core::enums::EffectKind;
use nexus_core::models::UnitStats;
use nexus_core::types::Position;

use crate::session::Session;
use crate::systems::damage;
use crate::tasks::{Arrow, StructureBrain};

/// Side effects collected while the structure query holds the world.
enum Effect {
    Fire {
        from: Position,
        target: Entity,
        aim: Position,
    },
    Bite(Entity),
    Bark(Position),
    PlayerSpeed(f32),
}

pub fn run(session: &mut Session, dt: f32) {
    let candidates = enemy_candidates(session);
    let player = session.player_position();
    let cursor = session.cursor;
    let mut effects = Vec::new();

    let Session { world, rng, .. } = session;
    for (_, (structure, pos, brain)) in
        world.query_mut::<(&Structure, &mut Position, &mut StructureBrain)>()
    {
        if !structure.deployed {
            *pos = cursor;
            continue;
        }
        match brain {
            StructureBrain::Tower { cooldown, target } => {
                cooldown.tick(dt);
                if let Some((victim, aim)) = tower_shot(*pos, cooldown.is_ready(), target, &candidates) {
                    effects.push(Effect::Fire {
                        from: *pos,
                        target: victim,
                        aim,
                    });
                    cooldown.reset();
                }
            }
            StructureBrain::Dog {
                cooldown,
                target,
                wander,
                lunge,
            } => {
                cooldown.tick(dt);

                if let Some((mut active, victim)) = *lunge {
                    let aim = find(&candidates, victim).map(|c| c.position);
                    *lunge = match active.advance(dt, aim) {
                        LungeStep::Moving(next) => {
                            *pos = next;
                            Some((active, victim))
                        }
                        LungeStep::Strike(next) => {
                            *pos = next;
                            effects.push(Effect::Bite(victim));
                            Some((active, victim))
                        }
                        LungeStep::Done(home) => {
                            *pos = home;
                            None
                        }
                        LungeStep::Aborted => None,
                    };
                    continue;
                }

                keep_or_acquire(*pos, DOG_RANGE, target, &candidates);
                if let Some(victim) = *target {
                    if cooldown.is_ready() {
                        if let Some(found) = find(&candidates, victim) {
                            *wander = None;
                            *lunge = Some((Lunge::new(*pos, found.position, DOG_LUNGE_SPEED), victim));
                            cooldown.reset();
                            effects.push(Effect::Bark(*pos));
                            continue;
                        }
                    }
                } else if wander.is_none() {
                    let x = rng.gen_range(-DOG_WANDER_X..DOG_WANDER_X);
                    let y = rng.gen_range(-DOG_WANDER_Y..DOG_WANDER_Y);
                    *wander = Some(DirectMove::new(Position::new(x, y), DOG_SPEED));
                }

                // A walk already under way carries on until the next lunge.
                if let Some(walk) = *wander {
                    if walk.advance(pos, dt) == TaskStatus::Finished {
                        *wander = None;
                    }
                }
            }
            StructureBrain::Shed { boosted } => {
                let near = pos.range_to(&player) < SHED_RANGE;
                if near && !*boosted {
                    *boosted = true;
                    effects.push(Effect::PlayerSpeed(SHED_SPEED_BOOST));
                } else if !near && *boosted {
                    *boosted = false;
                    effects.push(Effect::PlayerSpeed(1.0 / SHED_SPEED_BOOST));
                }
            }
            StructureBrain::Inert => {}
        }
    }

    for effect in effects {
        match effect {
            Effect::Fire { from, target, aim } => {
                let travel = Travel::at_speed(from, aim, ARROW_SPEED);
                session.world.spawn((from, Arrow { target, travel }));
                session.play_effect(EffectKind::ArrowShot, from);
            }
            Effect::Bite(victim) => {
                damage::damage_enemy(session, victim, DOG_DAMAGE);
            }
            Effect::Bark(at) => session.play_effect(EffectKind::DogBark, at),
            Effect::PlayerSpeed(factor) => {
                if let Ok(mut stats) = session.world.get::<&mut UnitStats>(session.actors.player) {
                    stats.modify_speed(factor);
                }
            }
        }
    }
}

/// Keep the current target while it is eligible and return a shot when ready,
/// otherwise look for a new one. A freshly acquired target is shot on a later tick.
fn tower_shot(
    origin: Position,
    ready: bool,
    target: &mut Option<Entity>,
    candidates: &[Candidate<Entity>],
) -> Option<(Entity, Position)> {
    if let Some(victim) = *target {
        match find(candidates, victim) {
            Some(c) if !c.fleeing && still_in_range(origin, c.position, TOWER_RANGE) => {
                return ready.then_some((victim, c.position));
            }
            _ => *target = None,
        }
    }
    *target = acquire_nearest(origin, TOWER_RANGE, candidates.iter().copied());
    None
}

fn keep_or_acquire(
    origin: Position,
    range: f32,
    target: &mut Option<Entity>,
    candidates: &[Candidate<Entity>],
) {
    let keep = target
        .and_then(|victim| find(candidates, victim))
        .is_some_and(|c| !c.fleeing && still_in_range(origin, c.position, range));
    if !keep {
        *target = acquire_nearest(origin, range, candidates.iter().copied());
    }
}

fn find(candidates: &[Candidate<Entity>], entity: Entity) -> Option<Candidate<Entity>> {
    candidates.iter().find(|c| c.id == entity).copied()
}

/// Every live enemy, in spawn order.
fn enemy_candidates(session: &Session) -> Vec<Candidate<Entity>> {
    let mut query = session
        .world
        .query::<(&Enemy, &Position, &EnemyState, &SpawnOrder)>();
    let mut enemies: Vec<(SpawnOrder, Candidate<Entity>)> = query
        .iter()
        .map(|(entity, (_, position, state, order))| {
            (
                *order,
                Candidate {
                    id: entity,
                    position: *position,
                    fleeing: state.fleeing,
                },
            )
        })
        .collect();
    enemies.sort_by_key(|(order, _)| *order);
    enemies.into_iter().map(|(_, c)| c).collect()
}
