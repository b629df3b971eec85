//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D position in world units.
/// x = right, y = up. The nexus sits at the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub const ORIGIN: Position = Position::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Euclidean distance to another position.
    pub fn range_to(&self, other: &Position) -> f32 {
        self.to_vec2().distance(other.to_vec2())
    }

    /// Unit vector pointing at `other`, or zero when both points coincide.
    pub fn direction_to(&self, other: &Position) -> Vec2 {
        (other.to_vec2() - self.to_vec2()).normalize_or_zero()
    }

    /// Position moved `distance` units along `direction` (not normalised here).
    pub fn offset(&self, direction: Vec2, distance: f32) -> Position {
        (self.to_vec2() + direction * distance).into()
    }

    /// Whether this point lies inside the axis-aligned box centred on `center`.
    pub fn is_within_box(&self, center: &Position, half_extent: f32) -> bool {
        (self.x - center.x).abs() <= half_extent && (self.y - center.y).abs() <= half_extent
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Position> for Vec2 {
    fn from(p: Position) -> Self {
        p.to_vec2()
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }
}
