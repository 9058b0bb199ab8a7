//! Injectable uniform draws for map generation.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// `true` with probability `chance`.
    fn roll(&mut self, chance: f64) -> bool {
        self.next_unit() < chance
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// ChaCha8-backed draws; the same seed always yields the same sequence.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        unit_from_bits(self.rng.next_u64())
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Draws outside `[0, 1)` are clamped into it.
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let mut draws: Vec<f64> = draws.into();
        if draws.is_empty() {
            draws.push(0.0);
        }
        for draw in &mut draws {
            *draw = draw.clamp(0.0, MAX_UNIT);
        }
        Self { draws, cursor: 0 }
    }

    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw
    }
}

const MAX_UNIT: f64 = 1.0 - f64::EPSILON / 2.0;

/// Top 53 bits of `bits` as a float in `[0, 1)`.
fn unit_from_bits(bits: u64) -> f64 {
    (bits >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
}
