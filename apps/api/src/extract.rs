//! Request extractors whose rejections use the API error body.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use mentor_core::AppError;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Path parameters.
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

/// Query string parameters.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

/// JSON request body.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejection_error(rejection.status(), rejection.body_text()))?;

        Ok(Self(value))
    }
}

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejection_error(rejection.status(), rejection.body_text()))?;

        Ok(Self(value))
    }
}

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| rejection_error(rejection.status(), rejection.body_text()))?;

        Ok(Self(value))
    }
}

// Router wiring faults (missing path params) stay internal; the rest is client input.
fn rejection_error(status: StatusCode, detail: String) -> ApiError {
    if status.is_server_error() {
        return ApiError(AppError::internal(detail));
    }

    ApiError(AppError::validation(detail))
}
