//! Entity models: bounded-arithmetic value holders for units and the nexus.
//!
//! Models never validate their inputs and never clamp health below zero.
//! Callers are responsible for death checks.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Mutable stat block owned by a single player unit or enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Movement speed (units per second).
    pub speed: f32,
    pub damage: f32,
    /// Attack cycle length in seconds.
    pub attack_speed: f32,
    /// Dead at or below zero. For the player unit this is the nexus heal amount.
    pub health: f32,
}

/// Health of the defended base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NexusStats {
    pub current_health: f32,
    pub maximum_health: f32,
}

/// Session-wide enemy modifiers chosen through loot.
///
/// Applied once to each enemy at spawn; already spawned enemies keep their stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionModifiers {
    pub enemy_speed_multiplier: f32,
    /// Added to enemy damage at spawn.
    pub enemy_damage_bonus: f32,
    /// Added to enemy attack speed at spawn.
    pub enemy_attack_speed_bonus: f32,
}

impl UnitStats {
    pub fn new(speed: f32, damage: f32, attack_speed: f32, health: f32) -> Self {
        Self {
            speed,
            damage,
            attack_speed,
            health,
        }
    }

    pub fn player() -> Self {
        Self::new(PLAYER_SPEED, PLAYER_DAMAGE, PLAYER_ATTACK_SPEED, PLAYER_HEAL)
    }

    pub fn enemy() -> Self {
        Self::new(ENEMY_SPEED, ENEMY_DAMAGE, ENEMY_ATTACK_SPEED, ENEMY_HEALTH)
    }

    pub fn modify_health(&mut self, delta: f32) {
        self.health += delta;
    }

    /// Multiplicative.
    pub fn modify_speed(&mut self, factor: f32) {
        self.speed *= factor;
    }

    pub fn modify_damage(&mut self, delta: f32) {
        self.damage += delta;
    }

    pub fn modify_attack_speed(&mut self, delta: f32) {
        self.attack_speed += delta;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

impl NexusStats {
    pub fn new(current_health: f32, maximum_health: f32) -> Self {
        Self {
            current_health,
            maximum_health,
        }
    }

    /// Heal or hurt. Not capped in either direction.
    pub fn modify_current_health(&mut self, delta: f32) {
        self.current_health += delta;
    }

    /// Raising the ceiling raises current health by the same amount.
    /// Lowering it caps current health to the new ceiling.
    pub fn modify_maximum_health(&mut self, delta: f32) {
        self.maximum_health += delta;
        if delta > 0.0 {
            self.current_health += delta;
        } else if self.current_health > self.maximum_health {
            self.current_health = self.maximum_health;
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current_health <= 0.0
    }
}

impl Default for NexusStats {
    fn default() -> Self {
        Self::new(NEXUS_HEALTH, NEXUS_HEALTH)
    }
}

impl SessionModifiers {
    pub fn apply_to(&self, stats: &mut UnitStats) {
        stats.modify_speed(self.enemy_speed_multiplier);
        stats.modify_damage(self.enemy_damage_bonus);
        stats.modify_attack_speed(self.enemy_attack_speed_bonus);
    }
}

impl Default for SessionModifiers {
    fn default() -> Self {
        Self {
            enemy_speed_multiplier: 1.0,
            enemy_damage_bonus: 1.0,
            enemy_attack_speed_bonus: 1.0,
        }
    }
}
