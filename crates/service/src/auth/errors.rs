use thiserror::Error;

use crate::errors::StoreError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("user already exists")]
    Conflict,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("token error: {0}")]
    TokenError(String),
    #[error("store error: {0}")]
    Store(StoreError),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::Unauthorized => 1004,
            AuthError::TokenError(_) => 1102,
            AuthError::Store(_) => 1200,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => AuthError::Validation(msg),
            StoreError::Conflict(_) => AuthError::Conflict,
            other => AuthError::Store(other),
        }
    }
}
