//! Ease-in curve shared by timed motion (arrows, lunges).

use glam::Vec2;

/// Quadratic ease-in: slow start, full speed on arrival.
pub fn ease_in_quad(t: f32) -> f32 {
    t * t
}

/// Interpolate from `start` to `end` after `current` of `duration` seconds.
/// Snaps to `end` once the duration has elapsed.
pub fn lerp(start: Vec2, end: Vec2, current: f32, duration: f32) -> Vec2 {
    if current >= duration || duration <= 0.0 {
        return end;
    }
    start + (end - start) * ease_in_quad(current / duration)
}
