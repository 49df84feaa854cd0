mod common;
mod roles;
mod users;

pub use common::{HealthResponse, ListQueryParams, PageResponse};
pub use roles::{CreatePermissionRequest, CreateRoleRequest, PermissionResponse, RoleResponse};
pub use users::{
    ChangeUserRoleRequest, CreateUserRequest, UpdateUserRequest, UserExportResponse,
    UserMessageRequest, UserResponse,
};
