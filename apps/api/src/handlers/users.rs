use axum::Json;
use axum::extract::State;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use mentor_application::UserMessageCommand;
use mentor_core::AppError;
use mentor_domain::{PermissionId, RoleId, UserId};

use crate::dto::{
    ChangeUserRoleRequest, CreateUserRequest, ListQueryParams, PageResponse, UpdateUserRequest,
    UserExportResponse, UserMessageRequest, UserResponse,
};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

pub async fn create_user_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.create_user(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn list_users_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListQueryParams>,
) -> ApiResult<Json<PageResponse<UserResponse>>> {
    let page = state
        .user_service
        .get_all_users(params.into())
        .await?
        .map(UserResponse::from);

    Ok(Json(PageResponse::from(page)))
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.get_user_by_id(UserId::new(user_id)).await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_user(UserId::new(user_id), payload.into())
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn remove_user_handler(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.remove_user(UserId::new(user_id)).await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn change_user_role_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ChangeUserRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .change_permission(UserId::new(payload.user_id), RoleId::new(payload.role_id))
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn grant_user_permission_handler(
    State(state): State<AppState>,
    ApiPath((user_id, permission_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .grant_permission_to_user(UserId::new(user_id), PermissionId::new(permission_id))
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn revoke_user_permission_handler(
    State(state): State<AppState>,
    ApiPath((user_id, permission_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .revoke_permission_from_user(UserId::new(user_id), PermissionId::new(permission_id))
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn send_user_message_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UserMessageRequest>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .send_message(UserMessageCommand {
            user_id: UserId::new(payload.user_id),
            body: payload.body,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn export_users_handler(State(state): State<AppState>) -> ApiResult<Response> {
    let export = state.user_service.export_users().await?;
    let disposition = export_disposition(export.generated_at)?;

    Ok((
        [(CONTENT_DISPOSITION, disposition)],
        Json(UserExportResponse::from(export)),
    )
        .into_response())
}

fn export_disposition(generated_at: DateTime<Utc>) -> Result<HeaderValue, AppError> {
    let file_name = format!("users_{}.json", generated_at.format("%Y-%m-%d_%H:%M:%S"));

    HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\"")).map_err(|error| {
        AppError::internal(format!("invalid export file name '{file_name}': {error}"))
    })
}
