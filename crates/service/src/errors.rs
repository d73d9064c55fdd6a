use thiserror::Error;

use models::errors::ModelError;

/// Failures surfaced by the record store. "Not found" is never one of them:
/// lookups return `None` and mutations of absent ids are no-ops.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("corrupt data under key '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

impl StoreError {
    pub fn conflict(what: impl Into<String>) -> Self { Self::Conflict(what.into()) }

    pub fn validation(what: impl Into<String>) -> Self { Self::Validation(what.into()) }
}

impl From<ModelError> for StoreError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self { Self::Storage(e.to_string()) }
}
