//! Instance construction engine for BPPS benchmarks.
//!
//! This crate expands a [`bpps_core::GenerationConfig`] into jobs, builds one
//! deterministic instance per job, aggregates the outcomes, and encodes
//! instances in the canonical text format.

pub mod builder;
pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
pub mod partition;
pub mod planner;
pub mod random;
pub mod sampler;
pub mod stats;

pub use builder::{InstanceBuilder, SETUP_COST_MAX};
pub use engine::GenerationEngine;
pub use errors::{FailureReason, GenerationError};
pub use model::{GenerateOptions, GenerationOutcome};
pub use output::text::{encode_instance, instance_filename, parse_instance, read_instance, write_instance};
pub use partition::partition_items;
pub use planner::{JobIter, JobPlan, expand_jobs};
pub use random::RandomSource;
pub use sampler::WeightSampler;
pub use stats::{FailureRecord, GenerationStatistics, StatisticsReport};
