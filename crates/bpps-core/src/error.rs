use thiserror::Error;

/// Core error type shared across the BPPS crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration violates its invariants.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The configuration JSON Schema could not be compiled.
    #[error("schema error: {0}")]
    Schema(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results returned by the BPPS crates.
pub type Result<T> = std::result::Result<T, Error>;
