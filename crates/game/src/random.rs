//! Deterministic seeded random number generator.
//!
//! Uses the xorshift32 algorithm: fast, tiny state, and fully reproducible,
//! so a recorded input sequence replays to the exact same shot spread.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Deterministic pseudo-random number generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Creates a new RNG with the given seed.
    /// Seed of 0 is treated as 1 to avoid the degenerate all-zero sequence.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Returns a random float in `[0, 1)`.
    pub fn next(&mut self) -> f32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        (x as f32) / (u32::MAX as f32)
    }

    /// Returns a random float in `[min, max)`.
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next() * (max - min)
    }

    /// Returns a uniformly distributed point inside the unit disk.
    ///
    /// Radius uses a square-root remap so density is uniform over area,
    /// not bunched at the center.
    pub fn in_unit_disk(&mut self) -> Vec2 {
        let r = self.next().sqrt();
        let theta = self.next() * std::f32::consts::TAU;
        Vec2::new(r * theta.cos(), r * theta.sin())
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(1)
    }
}
