//! Wave director: spawn cadence and level completion for one combat level.

use nexus_core::config::WaveSpec;
use nexus_core::constants::FINAL_LEVEL;
use nexus_core::state::WaveView;

/// Permission to spawn one enemy this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnTicket {
    /// 1-based index of the enemy within the wave.
    pub index: u32,
}

/// What clearing the wave leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveOutcome {
    /// Offer loot for the cleared level.
    Loot(u32),
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveCounters {
    pub spawned: u32,
    pub deaths: u32,
    pub capacity: u32,
    pub accumulator: f32,
}

/// Owned by the live `Play` state and dropped with it.
#[derive(Debug, Clone)]
pub struct WaveDirector {
    spec: WaveSpec,
    accumulator: f32,
    spawned: u32,
    deaths: u32,
    completed: bool,
}

impl WaveDirector {
    /// The accumulator starts at `-grace` so the first spawn waits for the banner.
    pub fn new(spec: WaveSpec, grace: f32) -> Self {
        Self {
            spec,
            accumulator: -grace,
            spawned: 0,
            deaths: 0,
            completed: false,
        }
    }

    pub fn level(&self) -> u32 {
        self.spec.level
    }

    /// Advance the spawn clock. Yields a ticket when the cadence has strictly
    /// elapsed and the capacity is not yet reached.
    pub fn tick(&mut self, dt: f32) -> Option<SpawnTicket> {
        self.accumulator += dt;
        if self.accumulator > self.spec.cadence() && self.spawned < self.spec.capacity {
            self.accumulator = 0.0;
            self.spawned += 1;
            return Some(SpawnTicket {
                index: self.spawned,
            });
        }
        None
    }

    /// Count one defeat. Returns the outcome exactly once, on the defeat that
    /// brings the count to capacity.
    pub fn record_defeat(&mut self) -> Option<WaveOutcome> {
        if self.completed {
            return None;
        }
        self.deaths += 1;
        if self.deaths < self.spec.capacity {
            return None;
        }
        self.completed = true;
        if self.spec.level < FINAL_LEVEL {
            Some(WaveOutcome::Loot(self.spec.level))
        } else {
            Some(WaveOutcome::Victory)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn counters(&self) -> WaveCounters {
        WaveCounters {
            spawned: self.spawned,
            deaths: self.deaths,
            capacity: self.spec.capacity,
            accumulator: self.accumulator,
        }
    }

    pub fn view(&self) -> WaveView {
        let remaining = if self.spawned < self.spec.capacity {
            (self.spec.cadence() - self.accumulator).max(0.0)
        } else {
            0.0
        };
        WaveView {
            level: self.spec.level,
            spawned: self.spawned,
            deaths: self.deaths,
            capacity: self.spec.capacity,
            spawn_interval_remaining: remaining,
        }
    }
}
