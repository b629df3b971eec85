//! Damage application against a unit's stat block.

use nexus_core::models::UnitStats;

/// Result of a single damage application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Target was already fleeing; nothing changed.
    Ignored,
    /// Target survived and must be interrupted and stunned.
    Damaged { remaining: f32 },
    /// Health dropped to zero or below.
    Defeated,
}

/// Subtract `amount` from the target's health and classify the result.
pub fn apply_damage(stats: &mut UnitStats, fleeing: bool, amount: f32) -> DamageOutcome {
    if fleeing {
        return DamageOutcome::Ignored;
    }

    stats.modify_health(-amount);

    if stats.is_dead() {
        DamageOutcome::Defeated
    } else {
        DamageOutcome::Damaged {
            remaining: stats.health,
        }
    }
}
