use bpps_core::FractionRange;

use crate::random::RandomSource;

/// Draws integer weights from a capacity-relative range.
///
/// A draw is uniform over `[min * capacity, max * capacity]`, rounded to the
/// nearest integer and never below 1.
#[derive(Debug, Clone, Copy)]
pub struct WeightSampler {
    low: f64,
    high: f64,
}

impl WeightSampler {
    pub fn new(capacity: u64, range: FractionRange) -> Self {
        let (low, high) = range.scaled(capacity);
        Self { low, high }
    }

    pub fn sample(&self, rng: &mut RandomSource) -> u64 {
        to_weight(rng.uniform_f64(self.low, self.high))
    }

    /// Draw `count` weights in order.
    pub fn sample_many(&self, count: usize, rng: &mut RandomSource) -> Vec<u64> {
        (0..count).map(|_| self.sample(rng)).collect()
    }

    /// Inclusive bounds of every value [`Self::sample`] can return.
    pub fn bounds(&self) -> (u64, u64) {
        (to_weight(self.low), to_weight(self.high))
    }
}

fn to_weight(value: f64) -> u64 {
    (value.round() as u64).max(1)
}
