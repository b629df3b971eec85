//! Loot reward table.
//!
//! Static data: one offer per loot level, each pairing a structure with an
//! immediate bonus (or two structures). Nothing here branches on the level.

use nexus_core::constants::{
    LOOT_ENEMY_DAMAGE, LOOT_ENEMY_SPEED, LOOT_LEVELS, LOOT_MAX_HEALTH_FRACTION,
    LOOT_PLAYER_DAMAGE,
};
use nexus_core::enums::{LootButton, StructureKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reward {
    /// Enter deployment with this structure.
    PlaceStructure(StructureKind),
    /// Raise nexus maximum health by this fraction of its current maximum.
    MaxHealthFraction(f32),
    /// Add to the player's damage.
    PlayerDamage(f32),
    /// Overwrite the session enemy speed multiplier.
    EnemySpeed(f32),
    /// Overwrite the session enemy damage bonus.
    EnemyDamage(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardEntry {
    pub reward: Reward,
    pub header: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootOffer {
    pub a: RewardEntry,
    pub b: RewardEntry,
}

const TOWER: RewardEntry = RewardEntry {
    reward: Reward::PlaceStructure(StructureKind::Tower),
    header: "Tower",
    description: "Fires arrows at enemies within range.",
};

const SHED: RewardEntry = RewardEntry {
    reward: Reward::PlaceStructure(StructureKind::Shed),
    header: "Shed",
    description: "Doubles your speed while you stay close to it.",
};

const CAT: RewardEntry = RewardEntry {
    reward: Reward::PlaceStructure(StructureKind::Cat),
    header: "Cat",
    description: "Does nothing. Sits there looking pleased with itself.",
};

const DOG: RewardEntry = RewardEntry {
    reward: Reward::PlaceStructure(StructureKind::Dog),
    header: "Dog",
    description: "Roams the field and bites enemies that come near.",
};

const REWARD_TABLE: [LootOffer; LOOT_LEVELS as usize] = [
    LootOffer { a: TOWER, b: SHED },
    LootOffer { a: CAT, b: DOG },
    LootOffer {
        a: RewardEntry {
            reward: Reward::MaxHealthFraction(LOOT_MAX_HEALTH_FRACTION),
            header: "Deep Roots",
            description: "Maximum nexus health +50%.",
        },
        b: RewardEntry {
            reward: Reward::PlayerDamage(LOOT_PLAYER_DAMAGE),
            header: "Heavy Swing",
            description: "Your damage +20.",
        },
    },
    LootOffer {
        a: RewardEntry {
            reward: Reward::EnemySpeed(LOOT_ENEMY_SPEED),
            header: "Restless Raiders",
            description: "Enemies move 50% faster.",
        },
        b: RewardEntry {
            reward: Reward::EnemyDamage(LOOT_ENEMY_DAMAGE),
            header: "Angry Raiders",
            description: "Enemies hit harder.",
        },
    },
    LootOffer { a: CAT, b: DOG },
    LootOffer { a: SHED, b: TOWER },
];

/// Offer for a loot level (1..=6).
///
/// Levels come from the progression script, never from input; out of range is
/// a programming error. Release builds clamp.
pub fn offer(level: u32) -> &'static LootOffer {
    debug_assert!(
        (1..=LOOT_LEVELS).contains(&level),
        "loot level {level} out of range"
    );
    let index = level.clamp(1, LOOT_LEVELS) as usize - 1;
    &REWARD_TABLE[index]
}

pub fn reward_for(level: u32, button: LootButton) -> &'static RewardEntry {
    let offer = offer(level);
    match button {
        LootButton::A => &offer.a,
        LootButton::B => &offer.b,
    }
}
