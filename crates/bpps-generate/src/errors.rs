use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single job produced no instance. Recorded, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FailureReason {
    #[error(
        "infeasible partition: {item_count} items cannot give {class_count} classes \
         at least {min_items_per_class} items each"
    )]
    InfeasiblePartition {
        item_count: u32,
        class_count: u32,
        min_items_per_class: u32,
    },
}

/// Errors that abort a generation sweep.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] bpps_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("instance sink failed: {0}")]
    Sink(String),
    #[error("malformed instance at line {line}: {message}")]
    Parse { line: usize, message: String },
}
