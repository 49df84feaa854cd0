use mentor_application::{CreatePermissionCommand, CreateRoleCommand, PermissionDto, RoleDto};
use mentor_domain::PermissionId;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for permission creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-permission-request.ts"
)]
pub struct CreatePermissionRequest {
    pub name: String,
}

/// Incoming payload for role creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub permission_ids: Vec<i64>,
}

/// API representation of a permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    pub id: i64,
    pub name: String,
}

/// API representation of a role and its permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub id: i64,
    pub name: String,
    pub permissions: Vec<PermissionResponse>,
}

impl From<CreatePermissionRequest> for CreatePermissionCommand {
    fn from(request: CreatePermissionRequest) -> Self {
        Self { name: request.name }
    }
}

impl From<CreateRoleRequest> for CreateRoleCommand {
    fn from(request: CreateRoleRequest) -> Self {
        Self {
            name: request.name,
            permission_ids: request
                .permission_ids
                .into_iter()
                .map(PermissionId::new)
                .collect(),
        }
    }
}

impl From<PermissionDto> for PermissionResponse {
    fn from(permission: PermissionDto) -> Self {
        Self {
            id: permission.id.value(),
            name: permission.name,
        }
    }
}

impl From<RoleDto> for RoleResponse {
    fn from(role: RoleDto) -> Self {
        Self {
            id: role.id.value(),
            name: role.name,
            permissions: role
                .permissions
                .into_iter()
                .map(PermissionResponse::from)
                .collect(),
        }
    }
}
