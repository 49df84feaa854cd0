use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use mentor_domain::{PermissionId, RoleId};

use crate::dto::{
    CreateRoleRequest, ListQueryParams, PageResponse, PermissionResponse, RoleResponse,
};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

pub async fn create_role_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let role = state.role_service.create_role(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn list_roles_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListQueryParams>,
) -> ApiResult<Json<PageResponse<RoleResponse>>> {
    let page = state
        .role_service
        .get_all_roles(params.into())
        .await?
        .map(RoleResponse::from);

    Ok(Json(PageResponse::from(page)))
}

pub async fn get_role_handler(
    State(state): State<AppState>,
    ApiPath(role_id): ApiPath<i64>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state.role_service.get_role_by_id(RoleId::new(role_id)).await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn remove_role_handler(
    State(state): State<AppState>,
    ApiPath(role_id): ApiPath<i64>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state.role_service.remove_role(RoleId::new(role_id)).await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn list_role_permissions_handler(
    State(state): State<AppState>,
    ApiPath(role_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .role_service
        .get_role_permissions(RoleId::new(role_id))
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn add_role_permission_handler(
    State(state): State<AppState>,
    ApiPath((role_id, permission_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .role_service
        .add_permission_to_role(RoleId::new(role_id), PermissionId::new(permission_id))
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn remove_role_permission_handler(
    State(state): State<AppState>,
    ApiPath((role_id, permission_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .role_service
        .remove_permission_in_role(RoleId::new(role_id), PermissionId::new(permission_id))
        .await?;

    Ok(Json(RoleResponse::from(role)))
}
