use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ActionError;
use thiserror::Error;
use tracing::{error, warn};

/// HTTP face of a failed movie API call.
///
/// Client mistakes are answered with 200 and an `error` status body, matching
/// what existing callers expect; only transport and storage failures change the code.
#[derive(Debug)]
pub struct ApiError(pub ActionError);

impl From<ActionError> for ApiError {
    fn from(e: ActionError) -> Self { Self(e) }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ActionError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ActionError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ActionError::InvalidAction | ActionError::InvalidInput => StatusCode::OK,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self.0 {
            ActionError::Storage(source) => error!(error = %source, "movie store write failed"),
            other => warn!(error = %other, "movie api call rejected"),
        }
        (status, Json(self.0.to_response())).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage unavailable: {0}")]
    Storage(#[from] service::errors::ServiceError),
}
