use mentor_application::{PermissionService, RoleService, UserService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub role_service: RoleService,
    pub permission_service: PermissionService,
    pub user_service: UserService,
}
