#[cfg(test)]
mod tests {
    use nexus_core::models::UnitStats;
    use nexus_core::types::Position;

    use crate::cooldown::Cooldown;
    use crate::damage::{apply_damage, DamageOutcome};
    use crate::easing::{ease_in_quad, lerp};
    use crate::melee::{pursue, release_delay, ContactStep};
    use crate::targeting::{acquire_nearest, still_in_range, Candidate};
    use crate::tasks::{DirectMove, Lockout, Lunge, LungeStep, TaskStatus, Travel};

    const DT: f32 = 1.0 / 60.0;

    fn candidates_at(distances: &[f32]) -> Vec<Candidate<usize>> {
        distances
            .iter()
            .enumerate()
            .map(|(id, &d)| Candidate {
                id,
                position: Position::new(d, 0.0),
                fleeing: false,
            })
            .collect()
    }

    // ---- Targeting ----

    #[test]
    fn test_acquire_picks_closest_in_range() {
        let picked = acquire_nearest(Position::ORIGIN, 3.0, candidates_at(&[0.5, 2.0, 5.0]));
        assert_eq!(picked, Some(0));

        let picked = acquire_nearest(Position::ORIGIN, 3.0, candidates_at(&[2.0, 5.0, 0.5]));
        assert_eq!(picked, Some(2));
    }

    #[test]
    fn test_acquire_none_when_all_beyond_range() {
        assert_eq!(
            acquire_nearest(Position::ORIGIN, 3.0, candidates_at(&[3.5, 4.0, 10.0])),
            None
        );
        assert_eq!(
            acquire_nearest::<usize, _>(Position::ORIGIN, 3.0, Vec::new()),
            None
        );
    }

    #[test]
    fn test_acquire_range_is_strict() {
        assert_eq!(
            acquire_nearest(Position::ORIGIN, 3.0, candidates_at(&[3.0])),
            None
        );
    }

    #[test]
    fn test_acquire_skips_fleeing() {
        let mut candidates = candidates_at(&[0.5, 2.0]);
        candidates[0].fleeing = true;
        assert_eq!(acquire_nearest(Position::ORIGIN, 3.0, candidates), Some(1));
    }

    #[test]
    fn test_acquire_tie_keeps_first() {
        let candidates = vec![
            Candidate { id: 'a', position: Position::new(1.0, 0.0), fleeing: false },
            Candidate { id: 'b', position: Position::new(0.0, 1.0), fleeing: false },
        ];
        assert_eq!(acquire_nearest(Position::ORIGIN, 3.0, candidates), Some('a'));
    }

    #[test]
    fn test_still_in_range() {
        assert!(still_in_range(Position::ORIGIN, Position::new(2.9, 0.0), 3.0));
        assert!(!still_in_range(Position::ORIGIN, Position::new(3.0, 0.0), 3.0));
    }

    // ---- Cooldown ----

    #[test]
    fn test_cooldown_ready_strictly_after_period() {
        let mut cd = Cooldown::new(3.0);
        assert!(!cd.is_ready());
        for _ in 0..180 {
            cd.tick(DT);
        }
        // 180 ticks accumulate to about 3.0; one more tick is clearly past.
        cd.tick(DT);
        assert!(cd.is_ready());
        cd.reset();
        assert!(!cd.is_ready());
    }

    // ---- Damage ----

    #[test]
    fn test_damage_survives() {
        let mut stats = UnitStats::enemy();
        let outcome = apply_damage(&mut stats, false, 20.0);
        assert_eq!(outcome, DamageOutcome::Damaged { remaining: 80.0 });
    }

    #[test]
    fn test_damage_defeats_at_zero() {
        let mut stats = UnitStats::new(1.0, 5.0, 1.0, 30.0);
        assert_eq!(apply_damage(&mut stats, false, 30.0), DamageOutcome::Defeated);
    }

    #[test]
    fn test_damage_ignored_while_fleeing() {
        let mut stats = UnitStats::enemy();
        assert_eq!(apply_damage(&mut stats, true, 500.0), DamageOutcome::Ignored);
        assert_eq!(stats.health, 100.0);
    }

    // ---- Easing ----

    #[test]
    fn test_ease_in_quad_endpoints() {
        assert_eq!(ease_in_quad(0.0), 0.0);
        assert_eq!(ease_in_quad(0.5), 0.25);
        assert_eq!(ease_in_quad(1.0), 1.0);
    }

    #[test]
    fn test_lerp_snaps_to_end() {
        let start = glam::Vec2::ZERO;
        let end = glam::Vec2::new(4.0, 0.0);
        assert_eq!(lerp(start, end, 1.0, 2.0), glam::Vec2::new(1.0, 0.0));
        assert_eq!(lerp(start, end, 5.0, 2.0), end);
        assert_eq!(lerp(start, end, 0.0, 0.0), end);
    }

    // ---- Melee ----

    #[test]
    fn test_pursue_advances_then_strikes() {
        let target = Position::ORIGIN;
        match pursue(Position::new(5.0, 0.0), target, 1.5, 1.0, 1.0) {
            ContactStep::Advance(p) => assert!((p.x - 4.0).abs() < 1e-5),
            other => panic!("expected advance, got {other:?}"),
        }
        assert_eq!(
            pursue(Position::new(1.4, 0.0), target, 1.5, 1.0, DT),
            ContactStep::Strike
        );
    }

    #[test]
    fn test_release_delay_is_twice_attack_speed() {
        assert_eq!(release_delay(1.0), 2.0);
        assert_eq!(release_delay(0.25), 0.5);
    }

    // ---- Tasks ----

    #[test]
    fn test_lockout_counts_down() {
        let mut lock = Lockout::new(0.5);
        assert_eq!(lock.advance(0.25), TaskStatus::Running);
        assert_eq!(lock.advance(0.25), TaskStatus::Finished);
        assert_eq!(lock.remaining(), 0.0);
    }

    #[test]
    fn test_direct_move_reaches_target_exactly() {
        let target = Position::new(5.5, 0.0);
        let mover = DirectMove::new(target, 1.0);
        let mut pos = Position::new(9.0, 0.0);
        assert!((mover.duration_from(pos) - 3.5).abs() < 1e-5);

        let mut ticks = 0;
        while mover.advance(&mut pos, DT) == TaskStatus::Running {
            ticks += 1;
            assert!(ticks < 1000, "walk never finished");
        }
        assert_eq!(pos, target);
        assert!((209..=211).contains(&ticks));
    }

    #[test]
    fn test_direct_move_zero_speed_never_arrives() {
        let mover = DirectMove::new(Position::ORIGIN, 0.0);
        let mut pos = Position::new(1.0, 0.0);
        assert_eq!(mover.duration_from(pos), f32::INFINITY);
        assert_eq!(mover.advance(&mut pos, DT), TaskStatus::Running);
        assert_eq!(pos, Position::new(1.0, 0.0));
    }

    #[test]
    fn test_travel_follows_moving_destination() {
        let mut travel = Travel::at_speed(Position::ORIGIN, Position::new(4.0, 0.0), 8.0);
        assert_eq!(travel.duration(), 0.5);
        assert_eq!(travel.advance(0.25), TaskStatus::Running);
        let mid = travel.position_towards(Position::new(4.0, 2.0));
        assert_eq!(mid, Position::new(1.0, 0.5));
        assert_eq!(travel.advance(0.25), TaskStatus::Finished);
        assert_eq!(travel.position_towards(Position::new(4.0, 2.0)), Position::new(4.0, 2.0));
    }

    #[test]
    fn test_lunge_strikes_once_then_returns_home() {
        let home = Position::new(1.0, 1.0);
        let target = Position::new(1.7, 1.0);
        let mut lunge = Lunge::new(home, target, 7.0);

        let mut strikes = 0;
        let mut finished_at = None;
        for _ in 0..120 {
            match lunge.advance(DT, Some(target)) {
                LungeStep::Strike(at) => {
                    strikes += 1;
                    assert_eq!(at, target);
                }
                LungeStep::Done(at) => {
                    finished_at = Some(at);
                    break;
                }
                LungeStep::Moving(_) => {}
                LungeStep::Aborted => panic!("target was present"),
            }
        }
        assert_eq!(strikes, 1);
        assert_eq!(finished_at, Some(home));
    }

    #[test]
    fn test_lunge_aborts_when_target_vanishes() {
        let mut lunge = Lunge::new(Position::ORIGIN, Position::new(0.7, 0.0), 7.0);
        assert!(matches!(lunge.advance(DT, Some(Position::new(0.7, 0.0))), LungeStep::Moving(_)));
        assert_eq!(lunge.advance(DT, None), LungeStep::Aborted);
    }
}
