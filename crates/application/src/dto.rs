//! Transport-neutral projections of entities and the commands that create them.
//!
//! Conversions here are pure: entity to DTO through `From`, command to draft
//! through the `*_draft` helpers once referenced rows have been resolved.

use chrono::{DateTime, Utc};

use mentor_core::AppResult;
use mentor_domain::{
    Permission, PermissionDraft, PermissionId, Role, RoleDraft, RoleId, User, UserDraft, UserId,
};

/// Permission projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionDto {
    /// Permission identifier.
    pub id: PermissionId,
    /// Permission name.
    pub name: String,
}

/// Role projection including its granted permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDto {
    /// Role identifier.
    pub id: RoleId,
    /// Role name.
    pub name: String,
    /// Permissions granted through the role, ordered by identifier.
    pub permissions: Vec<PermissionDto>,
}

/// User projection including the assigned role and direct grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDto {
    /// User identifier.
    pub id: UserId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Assigned role, if any.
    pub role: Option<RoleDto>,
    /// Directly granted permissions, ordered by identifier.
    pub permissions: Vec<PermissionDto>,
}

/// Snapshot of every user handed to export renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserListExport {
    /// Moment the snapshot was taken.
    pub generated_at: DateTime<Utc>,
    /// Every user ordered by the configured default sort.
    pub users: Vec<UserDto>,
}

/// Input for role creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRoleCommand {
    /// Role name.
    pub name: String,
    /// Permissions granted to the role on creation.
    pub permission_ids: Vec<PermissionId>,
}

/// Input for permission creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePermissionCommand {
    /// Permission name.
    pub name: String,
}

/// Input for user creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserCommand {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Optional initial role.
    pub role_id: Option<RoleId>,
    /// Directly granted permissions.
    pub permission_ids: Vec<PermissionId>,
}

/// Input for renaming a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserCommand {
    /// New first name.
    pub first_name: String,
    /// New last name.
    pub last_name: String,
}

/// Input for sending a message to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessageCommand {
    /// Target user identifier.
    pub user_id: UserId,
    /// Message body.
    pub body: String,
}

impl From<&Permission> for PermissionDto {
    fn from(permission: &Permission) -> Self {
        Self {
            id: permission.id(),
            name: permission.name().as_str().to_owned(),
        }
    }
}

impl From<Permission> for PermissionDto {
    fn from(permission: Permission) -> Self {
        Self::from(&permission)
    }
}

impl From<&Role> for RoleDto {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id(),
            name: role.name().as_str().to_owned(),
            permissions: role.permissions().iter().map(PermissionDto::from).collect(),
        }
    }
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self::from(&role)
    }
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            first_name: user.first_name().as_str().to_owned(),
            last_name: user.last_name().as_str().to_owned(),
            role: user.role().map(RoleDto::from),
            permissions: user.permissions().iter().map(PermissionDto::from).collect(),
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Builds a role draft from a command and its resolved permissions.
pub fn role_draft(command: CreateRoleCommand, permissions: Vec<Permission>) -> AppResult<RoleDraft> {
    RoleDraft::new(command.name, permissions)
}

/// Builds a permission draft from a command.
pub fn permission_draft(command: CreatePermissionCommand) -> AppResult<PermissionDraft> {
    PermissionDraft::new(command.name)
}

/// Builds a user draft from a command and its resolved references.
pub fn user_draft(
    command: CreateUserCommand,
    role: Option<Role>,
    permissions: Vec<Permission>,
) -> AppResult<UserDraft> {
    UserDraft::new(command.first_name, command.last_name, role, permissions)
}
