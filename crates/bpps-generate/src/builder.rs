use bpps_core::{BenchmarkInstance, GenerationConfig, GenerationJob, ItemClass};

use crate::errors::FailureReason;
use crate::model::GenerationOutcome;
use crate::partition::partition_items;
use crate::random::RandomSource;
use crate::sampler::WeightSampler;

/// Largest setup cost magnitude. Costs are drawn uniformly from `-SETUP_COST_MAX..=-1`.
pub const SETUP_COST_MAX: u64 = 5;

/// Assembles one instance per job.
#[derive(Debug, Clone, Copy)]
pub struct InstanceBuilder {
    min_items_per_class: u32,
    bin_cost: u64,
}

impl InstanceBuilder {
    pub fn new(min_items_per_class: u32, bin_cost: u64) -> Self {
        Self {
            min_items_per_class,
            bin_cost,
        }
    }

    /// Builder using the sweep-wide settings of `config`.
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.min_items_per_class, config.bin_cost)
    }

    /// Build the instance for `job` with its own random stream.
    pub fn build_job(&self, job: &GenerationJob) -> GenerationOutcome {
        let mut rng = RandomSource::for_job(job);
        self.build(job, &mut rng).into()
    }

    /// Build the instance for `job`, drawing from `rng`.
    ///
    /// Draw order: partition surplus, then per class (in index order) the
    /// setup weight, the setup cost when enabled, and the item weights.
    pub fn build(
        &self,
        job: &GenerationJob,
        rng: &mut RandomSource,
    ) -> Result<BenchmarkInstance, FailureReason> {
        let sizes = partition_items(
            job.item_count,
            job.class_count,
            self.min_items_per_class,
            rng,
        )?;

        let setup_sampler = WeightSampler::new(job.capacity, job.setup_weight_range);
        let item_sampler = WeightSampler::new(job.capacity, job.item_weight_range);

        let classes = sizes
            .into_iter()
            .map(|size| {
                let setup_weight = setup_sampler.sample(rng);
                let setup_cost = if job.has_setup_costs() {
                    -(rng.uniform_u64(1, SETUP_COST_MAX) as i64)
                } else {
                    0
                };
                let item_weights = item_sampler.sample_many(size as usize, rng);
                ItemClass {
                    setup_cost,
                    setup_weight,
                    item_weights,
                }
            })
            .collect();

        Ok(BenchmarkInstance {
            item_count: job.item_count,
            class_count: job.class_count,
            capacity: job.capacity,
            bin_cost: self.bin_cost,
            classes,
        })
    }
}
