use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
}

impl ModelError {
    pub fn required(field: &str) -> Self { Self::Validation(format!("{field} is required")) }
}

/// Reject empty or whitespace-only values for a required field.
pub fn require(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::required(field));
    }
    Ok(())
}
