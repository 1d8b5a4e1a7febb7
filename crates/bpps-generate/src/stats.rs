use bpps_core::GenerationJob;
use serde::{Deserialize, Serialize};

use crate::errors::FailureReason;
use crate::model::GenerationOutcome;

/// A job that produced no instance, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    #[serde(flatten)]
    pub job: GenerationJob,
    pub reason: FailureReason,
}

/// Aggregated outcomes of a sweep.
///
/// Partial statistics built by independent workers combine with
/// [`GenerationStatistics::merge`]; the result does not depend on merge order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationStatistics {
    pub total_attempted: u64,
    pub successful: u64,
    pub failed: u64,
    /// Failed jobs ordered by job index.
    pub failures: Vec<FailureRecord>,
}

impl GenerationStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one job.
    pub fn record(&mut self, job: &GenerationJob, outcome: &GenerationOutcome) {
        match outcome {
            GenerationOutcome::Success(_) => self.record_success(),
            GenerationOutcome::Failure(reason) => self.record_failure(job.clone(), reason.clone()),
        }
    }

    pub fn record_success(&mut self) {
        self.total_attempted += 1;
        self.successful += 1;
    }

    pub fn record_failure(&mut self, job: GenerationJob, reason: FailureReason) {
        self.total_attempted += 1;
        self.failed += 1;
        let position = self
            .failures
            .partition_point(|record| record.job.index <= job.index);
        self.failures.insert(position, FailureRecord { job, reason });
    }

    /// Combine two partial statistics.
    pub fn merge(mut self, other: GenerationStatistics) -> Self {
        self.total_attempted += other.total_attempted;
        self.successful += other.successful;
        self.failed += other.failed;
        self.failures.extend(other.failures);
        self.failures.sort_by_key(|record| record.job.index);
        self
    }

    /// Share of successful jobs in percent; 0 for an empty sweep.
    pub fn success_rate(&self) -> f64 {
        if self.total_attempted == 0 {
            0.0
        } else {
            self.successful as f64 / self.total_attempted as f64 * 100.0
        }
    }

    /// Serializable summary for `generation_statistics.json`.
    pub fn report(&self) -> StatisticsReport {
        StatisticsReport {
            total_attempted: self.total_attempted,
            successful: self.successful,
            failed: self.failed,
            success_rate: self.success_rate(),
            failed_instances: self.failures.clone(),
        }
    }
}

impl Extend<(GenerationJob, GenerationOutcome)> for GenerationStatistics {
    fn extend<I: IntoIterator<Item = (GenerationJob, GenerationOutcome)>>(&mut self, iter: I) {
        for (job, outcome) in iter {
            self.record(&job, &outcome);
        }
    }
}

impl FromIterator<(GenerationJob, GenerationOutcome)> for GenerationStatistics {
    fn from_iter<I: IntoIterator<Item = (GenerationJob, GenerationOutcome)>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

/// Statistics as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub total_attempted: u64,
    pub successful: u64,
    pub failed: u64,
    pub success_rate: f64,
    pub failed_instances: Vec<FailureRecord>,
}
