//! Line-of-sight probe against square hit boxes.
//!
//! Steps along a straight ray at a fixed interval and reports the first box
//! a sample falls inside. Used to reject enemy spawn points whose straight
//! path to the nexus is blocked by a deployed structure.

use glam::Vec2;

use nexus_core::constants::LOS_SAMPLE_INTERVAL;
use nexus_core::types::Position;

/// An axis-aligned square box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub center: Position,
    pub half_extent: f32,
}

impl BoxShape {
    pub fn contains(&self, point: &Position) -> bool {
        point.is_within_box(&self.center, self.half_extent)
    }
}

/// What a probe ran into first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeHit {
    Target,
    /// Index into the obstacle slice.
    Obstacle(usize),
    Nothing,
}

/// Cast a ray of `length` from `from` along `direction` and report the first box hit.
///
/// Obstacles win over the target when both contain the same sample.
pub fn probe(
    from: Position,
    direction: Vec2,
    length: f32,
    target: &BoxShape,
    obstacles: &[BoxShape],
) -> ProbeHit {
    let direction = direction.normalize_or_zero();
    if direction == Vec2::ZERO {
        return ProbeHit::Nothing;
    }

    let samples = (length / LOS_SAMPLE_INTERVAL).ceil() as usize;
    for i in 0..=samples {
        let distance = (i as f32 * LOS_SAMPLE_INTERVAL).min(length);
        let sample = from.offset(direction, distance);

        if let Some(index) = obstacles.iter().position(|o| o.contains(&sample)) {
            return ProbeHit::Obstacle(index);
        }
        if target.contains(&sample) {
            return ProbeHit::Target;
        }
    }

    ProbeHit::Nothing
}

/// Whether the straight line from `from` toward the target's center reaches it unobstructed.
pub fn has_line_of_sight(
    from: Position,
    length: f32,
    target: &BoxShape,
    obstacles: &[BoxShape],
) -> bool {
    let direction = from.direction_to(&target.center);
    probe(from, direction, length, target, obstacles) == ProbeHit::Target
}
