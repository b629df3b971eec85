//! Tunable game configuration.
//!
//! Defaults come from [`constants`](crate::constants). A config can be loaded
//! from JSON; missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::models::{NexusStats, UnitStats};

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("wave table has no entry for level {0}")]
    MissingWave(u32),
    #[error("wave level {level}: capacity must be positive")]
    EmptyWave { level: u32 },
    #[error("wave level {level}: duration must be positive, got {duration}")]
    InvalidDuration { level: u32, duration: f32 },
    #[error("{unit} attack speed must be positive, got {value}")]
    InvalidAttackSpeed { unit: &'static str, value: f32 },
    #[error("{unit} speed must not be negative, got {value}")]
    NegativeSpeed { unit: &'static str, value: f32 },
    #[error("nexus health {current} is outside (0, {maximum}]")]
    InvalidNexusHealth { current: f32, maximum: f32 },
}

/// How many enemies one combat level spawns, and over how long.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    pub level: u32,
    /// Enemies to spawn, and defeats needed to clear the level.
    pub capacity: u32,
    /// Seconds over which the capacity is spread.
    pub duration_secs: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: UnitStats,
    pub enemy: UnitStats,
    pub nexus: NexusStats,
    pub waves: Vec<WaveSpec>,
    pub wave_start_grace_secs: f32,
    pub level_complete_delay_secs: f32,
    pub hit_stun_secs: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: UnitStats::player(),
            enemy: UnitStats::enemy(),
            nexus: NexusStats::default(),
            waves: WAVE_TABLE
                .iter()
                .map(|&(level, capacity, duration_secs)| WaveSpec {
                    level,
                    capacity,
                    duration_secs,
                })
                .collect(),
            wave_start_grace_secs: WAVE_START_GRACE_SECS,
            level_complete_delay_secs: LEVEL_COMPLETE_DELAY_SECS,
            hit_stun_secs: HIT_STUN_SECS,
        }
    }
}

impl WaveSpec {
    /// Seconds between consecutive spawns.
    pub fn cadence(&self) -> f32 {
        self.duration_secs / self.capacity as f32
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (unit, stats) in [("player", &self.player), ("enemy", &self.enemy)] {
            if stats.attack_speed <= 0.0 {
                return Err(ConfigError::InvalidAttackSpeed {
                    unit,
                    value: stats.attack_speed,
                });
            }
            if stats.speed < 0.0 {
                return Err(ConfigError::NegativeSpeed {
                    unit,
                    value: stats.speed,
                });
            }
        }

        if self.nexus.current_health <= 0.0
            || self.nexus.current_health > self.nexus.maximum_health
        {
            return Err(ConfigError::InvalidNexusHealth {
                current: self.nexus.current_health,
                maximum: self.nexus.maximum_health,
            });
        }

        for level in (TUTORIAL_LEVEL + 1)..=FINAL_LEVEL {
            let spec = self
                .waves
                .iter()
                .find(|w| w.level == level)
                .ok_or(ConfigError::MissingWave(level))?;
            if spec.capacity == 0 {
                return Err(ConfigError::EmptyWave { level });
            }
            if spec.duration_secs <= 0.0 {
                return Err(ConfigError::InvalidDuration {
                    level,
                    duration: spec.duration_secs,
                });
            }
        }
        Ok(())
    }

    /// Wave parameters for a combat level (2..=7).
    ///
    /// The level never comes from outside input; an out-of-range level is a
    /// programming error. Release builds clamp to the nearest defined level.
    pub fn wave(&self, level: u32) -> WaveSpec {
        debug_assert!(
            ((TUTORIAL_LEVEL + 1)..=FINAL_LEVEL).contains(&level),
            "wave level {level} out of range"
        );
        let level = level.clamp(TUTORIAL_LEVEL + 1, FINAL_LEVEL);
        self.waves
            .iter()
            .copied()
            .find(|w| w.level == level)
            .unwrap_or(WaveSpec {
                level,
                capacity: 1,
                duration_secs: 1.0,
            })
    }
}
