use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn storage(e: impl std::fmt::Display) -> Self { Self::Storage(e.to_string()) }
}

/// Failures of a movie API call. The display text is what clients see in `message`.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Invalid action")]
    InvalidAction,
    #[error("Movie name and link required")]
    InvalidInput,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Failed to save movie")]
    Storage(#[source] ServiceError),
}

impl From<ServiceError> for ActionError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(_) => Self::InvalidInput,
            other => Self::Storage(other),
        }
    }
}
