use std::time::Instant;

use bpps_core::{
    BenchmarkInstance, GenerationConfig, GenerationJob, ValidationIssue, validate_config,
};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::builder::InstanceBuilder;
use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationOutcome};
use crate::planner::{JobPlan, expand_jobs};
use crate::stats::GenerationStatistics;

/// Entry point for running a generation sweep.
#[derive(Debug, Clone, Default)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Lazily build every job of `config` in sweep order.
    ///
    /// The config is used as given; call [`validate_config`] first when it
    /// comes from an untrusted source.
    pub fn outcomes<'a>(
        &self,
        config: &'a GenerationConfig,
    ) -> impl Iterator<Item = (GenerationJob, GenerationOutcome)> + 'a {
        let builder = InstanceBuilder::from_config(config);
        expand_jobs(config).map(move |job| {
            let outcome = builder.build_job(&job);
            (job, outcome)
        })
    }

    /// Validate `config`, build every job, and hand each instance to `sink`.
    ///
    /// Infeasible jobs are recorded in the returned statistics and the sweep
    /// continues. A sink error stops the sweep and is returned as is.
    ///
    /// In parallel mode, configs whose jobs share a filename are rejected:
    /// concurrent writers would leave an arbitrary one of them on disk.
    pub fn run<F>(
        &self,
        config: &GenerationConfig,
        sink: F,
    ) -> Result<GenerationStatistics, GenerationError>
    where
        F: Fn(&GenerationJob, &BenchmarkInstance) -> Result<(), GenerationError> + Sync,
    {
        let warnings = validate_config(config).into_result()?;
        for issue in &warnings {
            warn!(
                event = "config_warning",
                code = %issue.code,
                path = %issue.path,
                message = %issue.message
            );
        }
        if self.options.parallel {
            if let Some(issue) = warnings.iter().find(|issue| collides_filenames(issue)) {
                return Err(bpps_core::Error::InvalidConfig(format!(
                    "{}: {} (parallel runs require unique instance filenames)",
                    issue.path, issue.message
                ))
                .into());
            }
        }

        let start = Instant::now();
        let plan = JobPlan::new(config);
        let builder = InstanceBuilder::from_config(config);

        info!(
            event = "generation_started",
            jobs = plan.len(),
            parallel = self.options.parallel,
            min_items_per_class = config.min_items_per_class
        );

        let stats = if self.options.parallel {
            (0..plan.len())
                .into_par_iter()
                .filter_map(|index| plan.job_at(index))
                .map(|job| -> Result<GenerationStatistics, GenerationError> {
                    let mut partial = GenerationStatistics::new();
                    process_job(&builder, job, &sink, &mut partial)?;
                    Ok(partial)
                })
                .try_reduce(GenerationStatistics::new, |left, right| Ok(left.merge(right)))?
        } else {
            let mut stats = GenerationStatistics::new();
            for job in plan.iter() {
                process_job(&builder, job, &sink, &mut stats)?;
            }
            stats
        };

        info!(
            event = "generation_completed",
            attempted = stats.total_attempted,
            successful = stats.successful,
            failed = stats.failed,
            duration_ms = start.elapsed().as_millis() as u64
        );

        Ok(stats)
    }
}

fn process_job<F>(
    builder: &InstanceBuilder,
    job: GenerationJob,
    sink: &F,
    stats: &mut GenerationStatistics,
) -> Result<(), GenerationError>
where
    F: Fn(&GenerationJob, &BenchmarkInstance) -> Result<(), GenerationError>,
{
    match builder.build_job(&job) {
        GenerationOutcome::Success(instance) => {
            sink(&job, &instance)?;
            debug!(event = "job_generated", job = %job.key(), index = job.index);
            stats.record_success();
        }
        GenerationOutcome::Failure(reason) => {
            warn!(event = "job_failed", job = %job.key(), index = job.index, reason = %reason);
            stats.record_failure(job, reason);
        }
    }
    Ok(())
}

fn collides_filenames(issue: &ValidationIssue) -> bool {
    matches!(issue.code.as_str(), "duplicate_value" | "range_name_collision")
}
