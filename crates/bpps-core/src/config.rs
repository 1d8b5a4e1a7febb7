use std::fmt;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Minimum number of items each class receives unless configured otherwise.
pub const DEFAULT_MIN_ITEMS_PER_CLASS: u32 = 2;

/// Per-bin cost written into every instance unless configured otherwise.
pub const DEFAULT_BIN_COST: u64 = 10;

/// Closed fractional range `[min, max]` relative to the bin capacity.
///
/// Serialized as a two-element array (`[0.05, 0.15]`), which is the shape
/// used by existing configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FractionRange(pub f64, pub f64);

impl FractionRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self(min, max)
    }

    pub fn min(&self) -> f64 {
        self.0
    }

    pub fn max(&self) -> f64 {
        self.1
    }

    /// Returns true when `0 < min <= max <= 1`.
    pub fn is_valid(&self) -> bool {
        self.0.is_finite()
            && self.1.is_finite()
            && self.0 > 0.0
            && self.1 <= 1.0
            && self.0 <= self.1
    }

    /// Bounds as whole percentages, used in instance filenames.
    pub fn percent_bounds(&self) -> (u32, u32) {
        (to_percent(self.0), to_percent(self.1))
    }

    /// Continuous bounds scaled by `capacity`.
    pub fn scaled(&self, capacity: u64) -> (f64, f64) {
        let capacity = capacity as f64;
        (self.0 * capacity, self.1 * capacity)
    }
}

impl fmt::Display for FractionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}

fn to_percent(fraction: f64) -> u32 {
    (fraction * 100.0).round().max(0.0) as u32
}

/// Declarative parameter grid for a generation sweep.
///
/// Every list contributes one axis of the Cartesian product; each element of
/// the product becomes one [`crate::GenerationJob`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationConfig {
    /// Bin capacities.
    pub capacities: Vec<u64>,
    /// Total number of items per instance.
    pub num_items: Vec<u32>,
    /// Number of item classes per instance.
    pub num_classes: Vec<u32>,
    /// Item weight ranges as fractions of the capacity.
    pub item_weight_ranges: Vec<FractionRange>,
    /// Setup weight ranges as fractions of the capacity.
    pub setup_weight_ranges: Vec<FractionRange>,
    /// 0 = no setup costs, 1 = with setup costs.
    pub setup_cost_flags: Vec<u8>,
    /// Seeds; one instance per seed for every other combination.
    pub seeds: Vec<u64>,
    /// Minimum number of items assigned to every class.
    #[serde(default = "default_min_items_per_class")]
    pub min_items_per_class: u32,
    /// Fixed per-bin cost used across the sweep.
    #[serde(default = "default_bin_cost")]
    pub bin_cost: u64,
    /// Directory receiving the generated files. Not interpreted by the engine.
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
}

impl GenerationConfig {
    /// Number of jobs in the sweep (product of all list lengths).
    pub fn job_count(&self) -> usize {
        [
            self.num_classes.len(),
            self.num_items.len(),
            self.capacities.len(),
            self.item_weight_ranges.len(),
            self.setup_weight_ranges.len(),
            self.setup_cost_flags.len(),
            self.seeds.len(),
        ]
        .iter()
        .fold(1_usize, |acc, len| acc.saturating_mul(*len))
    }
}

impl Default for GenerationConfig {
    /// The benchmark sweep published with the dataset: 480 instances.
    fn default() -> Self {
        Self {
            capacities: vec![200, 1000, 10000],
            num_items: vec![25, 50, 75, 100, 200],
            num_classes: vec![5, 10],
            item_weight_ranges: vec![FractionRange(0.05, 0.15), FractionRange(0.15, 0.30)],
            setup_weight_ranges: vec![FractionRange(0.01, 0.10), FractionRange(0.10, 0.20)],
            setup_cost_flags: vec![0, 1],
            seeds: vec![0, 1],
            min_items_per_class: DEFAULT_MIN_ITEMS_PER_CLASS,
            bin_cost: DEFAULT_BIN_COST,
            output_directory: default_output_directory(),
        }
    }
}

fn default_min_items_per_class() -> u32 {
    DEFAULT_MIN_ITEMS_PER_CLASS
}

fn default_bin_cost() -> u64 {
    DEFAULT_BIN_COST
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("./generated_instances")
}
