use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mentor_core::AppError;

mod types;

pub use types::ErrorResponse;

/// Message returned for every internal failure. Store detail stays in the log.
const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let payload = match &self.0 {
            AppError::Internal { reason, message } => {
                tracing::error!(reason = reason.as_str(), "{message}");
                ErrorResponse::new(*reason, INTERNAL_ERROR_MESSAGE.to_owned())
            }
            error => ErrorResponse::new(error.reason(), error.message().to_owned()),
        };

        (status, Json(payload)).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
