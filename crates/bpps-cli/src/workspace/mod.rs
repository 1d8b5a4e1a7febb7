mod atomic;
mod config;

pub use atomic::write_json_atomic;
pub use config::{load_config, save_config};

use std::io;

use bpps_core::ValidationReport;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config validation failed with {} error(s)", .0.errors.len())]
    Validation(ValidationReport),
    #[error("invalid path: {0}")]
    Invalid(String),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
