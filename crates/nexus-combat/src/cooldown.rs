//! Elapsed-time accumulator gating periodic attacks.

/// Ready once more than `period` seconds have accumulated since the last reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    period: f32,
    elapsed: f32,
}

impl Cooldown {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_ready(&self) -> bool {
        self.elapsed > self.period
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
