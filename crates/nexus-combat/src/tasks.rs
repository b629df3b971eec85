//! Resumable, cancellable tasks.
//!
//! Each task carries its own progress between ticks and is advanced by the
//! caller once per tick. Cancelling a task means dropping it; whatever it
//! had already committed stays, nothing else happens.

use nexus_core::types::Position;

use crate::easing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Finished,
}

/// Plain countdown (hit stun, post-attack recovery, scripted waits).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lockout {
    remaining: f32,
}

impl Lockout {
    pub fn new(secs: f32) -> Self {
        Self { remaining: secs }
    }

    pub fn advance(&mut self, dt: f32) -> TaskStatus {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            TaskStatus::Finished
        } else {
            TaskStatus::Running
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}

/// Constant-speed walk to a fixed point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectMove {
    target: Position,
    speed: f32,
}

impl DirectMove {
    pub fn new(target: Position, speed: f32) -> Self {
        Self { target, speed }
    }

    /// Seconds the walk takes from `from`.
    pub fn duration_from(&self, from: Position) -> f32 {
        if self.speed <= 0.0 {
            return f32::INFINITY;
        }
        from.range_to(&self.target) / self.speed
    }

    /// Move `position` one tick closer. Snaps onto the target on the last step.
    pub fn advance(&self, position: &mut Position, dt: f32) -> TaskStatus {
        let step = self.speed * dt;
        if position.range_to(&self.target) > step {
            *position = position.offset(position.direction_to(&self.target), step);
            TaskStatus::Running
        } else {
            *position = self.target;
            TaskStatus::Finished
        }
    }

    pub fn target(&self) -> Position {
        self.target
    }
}

/// Timed flight from a fixed origin toward a destination that may move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Travel {
    origin: Position,
    elapsed: f32,
    duration: f32,
}

impl Travel {
    pub fn new(origin: Position, duration: f32) -> Self {
        Self {
            origin,
            elapsed: 0.0,
            duration,
        }
    }

    /// Flight at `speed` toward `destination`, timed from the current distance.
    pub fn at_speed(origin: Position, destination: Position, speed: f32) -> Self {
        Self::new(origin, origin.range_to(&destination) / speed)
    }

    pub fn advance(&mut self, dt: f32) -> TaskStatus {
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            TaskStatus::Finished
        } else {
            TaskStatus::Running
        }
    }

    /// Current position along the path toward `destination`.
    pub fn position_towards(&self, destination: Position) -> Position {
        easing::lerp(
            self.origin.to_vec2(),
            destination.to_vec2(),
            self.elapsed,
            self.duration,
        )
        .into()
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LungePhase {
    Out,
    Back,
}

/// What a lunge did this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LungeStep {
    Moving(Position),
    /// Reached the target; the caller applies damage now.
    Strike(Position),
    /// Back home.
    Done(Position),
    /// Target vanished mid-flight. No damage, attacker stays put.
    Aborted,
}

/// Out-and-back melee dash used by the dog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lunge {
    home: Position,
    phase: LungePhase,
    travel: Travel,
}

impl Lunge {
    pub fn new(home: Position, target: Position, speed: f32) -> Self {
        Self {
            home,
            phase: LungePhase::Out,
            travel: Travel::at_speed(home, target, speed),
        }
    }

    /// Advance one tick. `target` is the target's current position, or `None` if it is gone.
    pub fn advance(&mut self, dt: f32, target: Option<Position>) -> LungeStep {
        match self.phase {
            LungePhase::Out => {
                let Some(target) = target else {
                    return LungeStep::Aborted;
                };
                if self.travel.advance(dt) == TaskStatus::Finished {
                    self.phase = LungePhase::Back;
                    self.travel = Travel::new(target, self.travel.duration());
                    LungeStep::Strike(target)
                } else {
                    LungeStep::Moving(self.travel.position_towards(target))
                }
            }
            LungePhase::Back => {
                if self.travel.advance(dt) == TaskStatus::Finished {
                    LungeStep::Done(self.home)
                } else {
                    LungeStep::Moving(self.travel.position_towards(self.home))
                }
            }
        }
    }
}
