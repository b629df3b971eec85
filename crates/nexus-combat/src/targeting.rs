//! Nearest-target acquisition.

use nexus_core::types::Position;

/// A potential target as seen by an attacker.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<T> {
    pub id: T,
    pub position: Position,
    /// Fleeing candidates are never eligible.
    pub fleeing: bool,
}

/// Pick the eligible candidate closest to `origin` and strictly inside `range`.
///
/// Ties keep the first candidate encountered, so callers wanting
/// reproducible results should supply candidates in a stable order.
/// Returns `None` when nothing is eligible; that is the common case.
pub fn acquire_nearest<T, I>(origin: Position, range: f32, candidates: I) -> Option<T>
where
    I: IntoIterator<Item = Candidate<T>>,
{
    let mut best: Option<(T, f32)> = None;
    for candidate in candidates {
        if candidate.fleeing {
            continue;
        }
        let distance = origin.range_to(&candidate.position);
        if distance >= range {
            continue;
        }
        match best {
            Some((_, min)) if min <= distance => {}
            _ => best = Some((candidate.id, distance)),
        }
    }
    best.map(|(id, _)| id)
}

/// Whether a held target is still worth keeping.
pub fn still_in_range(origin: Position, target: Position, range: f32) -> bool {
    origin.range_to(&target) < range
}
