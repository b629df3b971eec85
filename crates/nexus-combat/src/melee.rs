//! Contact resolution for mobile attackers.
//!
//! A pursuing attacker walks straight at its target until it is inside the
//! contact radius, then halts and strikes once. Control returns to movement
//! after [`release_delay`].

use nexus_core::types::Position;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactStep {
    /// Still closing in; the attacker's new position.
    Advance(Position),
    /// Inside the contact radius: stop and strike.
    Strike,
}

pub fn pursue(
    attacker: Position,
    target: Position,
    contact_range: f32,
    speed: f32,
    dt: f32,
) -> ContactStep {
    if attacker.range_to(&target) < contact_range {
        ContactStep::Strike
    } else {
        ContactStep::Advance(attacker.offset(attacker.direction_to(&target), speed * dt))
    }
}

/// How long a melee attacker stays busy after striking.
pub fn release_delay(attack_speed: f32) -> f32 {
    2.0 * attack_speed
}
