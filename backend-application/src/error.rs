use backend_domain::{EventId, EventValidationError, RegistrationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("event {0} not found")]
    NotFound(EventId),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("storage unavailable: {0}")]
    Persistence(anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::Registration(err) => err.kind(),
            AppError::Validation(_) => "validation",
            AppError::Persistence(_) => "persistence",
        }
    }
}

impl From<EventValidationError> for AppError {
    fn from(value: EventValidationError) -> Self {
        AppError::Validation(value.to_string())
    }
}
