//! Tower arrows: home on their target, hit on arrival.

use hecs::Entity;

use nexus_combat::tasks::TaskStatus;
use nexus_core::constants::ARROW_DAMAGE;
use nexus_core::types::Position;

use crate::session::Session;
use crate::systems::damage;
use crate::tasks::Arrow;

pub fn run(session: &mut Session, dt: f32) {
    let arrows: Vec<(Entity, Arrow)> = session
        .world
        .query_mut::<&Arrow>()
        .into_iter()
        .map(|(entity, arrow)| (entity, *arrow))
        .collect();

    for (entity, mut arrow) in arrows {
        let Some(aim) = session.world.get::<&Position>(arrow.target).ok().map(|p| *p) else {
            // Target already gone.
            let _ = session.world.despawn(entity);
            continue;
        };

        let status = arrow.travel.advance(dt);
        if let Ok((pos, stored)) = session
            .world
            .query_one_mut::<(&mut Position, &mut Arrow)>(entity)
        {
            *pos = arrow.travel.position_towards(aim);
            *stored = arrow;
        }

        if status == TaskStatus::Finished {
            let _ = session.world.despawn(entity);
            damage::damage_enemy(session, arrow.target, ARROW_DAMAGE);
        }
    }
}
