//! Core contracts for the BPPS instance generator.
//!
//! This crate defines the generation configuration, the job and instance
//! types shared by the engine and the CLI, and the validation helpers that
//! guard the configuration before a sweep starts.

pub mod config;
pub mod error;
pub mod instance;
pub mod job;
pub mod schema;
pub mod validation;

pub use config::{DEFAULT_BIN_COST, DEFAULT_MIN_ITEMS_PER_CLASS, FractionRange, GenerationConfig};
pub use error::{Error, Result};
pub use instance::{BenchmarkInstance, ItemClass};
pub use job::GenerationJob;
pub use schema::config_json_schema;
pub use validation::{
    IssueSeverity, ValidatedConfig, ValidationIssue, ValidationReport, validate_config,
    validate_config_document, validate_config_json,
};
