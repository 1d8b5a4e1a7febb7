use bpps_core::BenchmarkInstance;

use crate::errors::FailureReason;

/// Options for the generation engine.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Build jobs on the rayon thread pool instead of sequentially.
    pub parallel: bool,
}

/// Result of building one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success(BenchmarkInstance),
    Failure(FailureReason),
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn instance(&self) -> Option<&BenchmarkInstance> {
        match self {
            Self::Success(instance) => Some(instance),
            Self::Failure(_) => None,
        }
    }
}

impl From<Result<BenchmarkInstance, FailureReason>> for GenerationOutcome {
    fn from(result: Result<BenchmarkInstance, FailureReason>) -> Self {
        match result {
            Ok(instance) => Self::Success(instance),
            Err(reason) => Self::Failure(reason),
        }
    }
}
