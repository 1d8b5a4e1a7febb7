use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::FractionRange;

/// One concrete parameter combination of a sweep.
///
/// A job fully determines the instance built from it: the same job always
/// produces the same instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationJob {
    /// Zero-based position of the job in the sweep enumeration.
    pub index: usize,
    pub capacity: u64,
    pub item_count: u32,
    pub class_count: u32,
    pub item_weight_range: FractionRange,
    pub setup_weight_range: FractionRange,
    pub setup_cost_flag: u8,
    pub seed: u64,
}

impl GenerationJob {
    /// Returns true when classes carry a (negative) setup cost.
    pub fn has_setup_costs(&self) -> bool {
        self.setup_cost_flag != 0
    }

    /// Stable identifier of the parameter combination.
    ///
    /// This is the instance filename without its extension, e.g.
    /// `bpps_d200n75m10w5_15s1_10f1_seed0`.
    pub fn key(&self) -> String {
        let (w_min, w_max) = self.item_weight_range.percent_bounds();
        let (s_min, s_max) = self.setup_weight_range.percent_bounds();
        format!(
            "bpps_d{}n{}m{}w{}_{}s{}_{}f{}_seed{}",
            self.capacity,
            self.item_count,
            self.class_count,
            w_min,
            w_max,
            s_min,
            s_max,
            self.setup_cost_flag,
            self.seed
        )
    }
}

impl fmt::Display for GenerationJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "d={}, n={}, m={}, v={}, s={}, f={}, seed={}",
            self.capacity,
            self.item_count,
            self.class_count,
            self.item_weight_range,
            self.setup_weight_range,
            self.setup_cost_flag,
            self.seed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_uses_percentages() {
        let job = GenerationJob {
            index: 0,
            capacity: 200,
            item_count: 75,
            class_count: 10,
            item_weight_range: FractionRange(0.05, 0.15),
            setup_weight_range: FractionRange(0.01, 0.10),
            setup_cost_flag: 1,
            seed: 0,
        };
        assert_eq!(job.key(), "bpps_d200n75m10w5_15s1_10f1_seed0");
        assert!(job.has_setup_costs());
    }
}
