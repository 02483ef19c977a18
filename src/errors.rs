use thiserror::Error;

/// Error type that captures common caisse failures.
#[derive(Debug, Error)]
pub enum CaisseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Operation cancelled")]
    Cancelled,
}
