use chrono::SecondsFormat;
use mentor_application::{CreateUserCommand, UpdateUserCommand, UserDto, UserListExport};
use mentor_domain::{PermissionId, RoleId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::roles::{PermissionResponse, RoleResponse};

/// Incoming payload for user creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub permission_ids: Vec<i64>,
}

/// Incoming payload for renaming a user.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-user-request.ts"
)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
}

/// Incoming payload for replacing the role of a user.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/change-user-role-request.ts"
)]
pub struct ChangeUserRoleRequest {
    pub user_id: i64,
    pub role_id: i64,
}

/// Incoming payload for messaging a user.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-message-request.ts"
)]
pub struct UserMessageRequest {
    pub user_id: i64,
    pub body: String,
}

/// API representation of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<RoleResponse>,
    pub permissions: Vec<PermissionResponse>,
}

/// Downloadable snapshot of every user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-export-response.ts"
)]
pub struct UserExportResponse {
    /// RFC 3339 timestamp of the snapshot.
    pub generated_at: String,
    pub users: Vec<UserResponse>,
}

impl From<CreateUserRequest> for CreateUserCommand {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            role_id: request.role_id.map(RoleId::new),
            permission_ids: request
                .permission_ids
                .into_iter()
                .map(PermissionId::new)
                .collect(),
        }
    }
}

impl From<UpdateUserRequest> for UpdateUserCommand {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
        }
    }
}

impl From<UserDto> for UserResponse {
    fn from(user: UserDto) -> Self {
        Self {
            id: user.id.value(),
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role.map(RoleResponse::from),
            permissions: user
                .permissions
                .into_iter()
                .map(PermissionResponse::from)
                .collect(),
        }
    }
}

impl From<UserListExport> for UserExportResponse {
    fn from(export: UserListExport) -> Self {
        Self {
            generated_at: export
                .generated_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            users: export.users.into_iter().map(UserResponse::from).collect(),
        }
    }
}
