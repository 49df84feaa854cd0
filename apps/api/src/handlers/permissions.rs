use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use mentor_domain::PermissionId;

use crate::dto::{CreatePermissionRequest, PermissionResponse};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

pub async fn create_permission_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreatePermissionRequest>,
) -> ApiResult<(StatusCode, Json<PermissionResponse>)> {
    let permission = state
        .permission_service
        .create_permission(payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PermissionResponse::from(permission)),
    ))
}

pub async fn list_permissions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .permission_service
        .get_all_permissions()
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn get_permission_handler(
    State(state): State<AppState>,
    ApiPath(permission_id): ApiPath<i64>,
) -> ApiResult<Json<PermissionResponse>> {
    let permission = state
        .permission_service
        .get_permission_by_id(PermissionId::new(permission_id))
        .await?;

    Ok(Json(PermissionResponse::from(permission)))
}
