//! Application services and ports.

#![forbid(unsafe_code)]

mod dto;
mod entity_ports;
mod fetch;
mod notification_ports;
mod pagination;
mod permission_service;
mod role_service;
mod user_service;

#[cfg(test)]
mod test_support;

pub use dto::{
    CreatePermissionCommand, CreateRoleCommand, CreateUserCommand, PermissionDto, RoleDto,
    UpdateUserCommand, UserDto, UserListExport, UserMessageCommand, permission_draft, role_draft,
    user_draft,
};
pub use entity_ports::{
    GroupWeekendRepository, PermissionRepository, RoleRepository, UnitOfWork, UnitOfWorkFactory,
    UserRepository, finish,
};
pub use fetch::{
    PERMISSION_NOT_FOUND_MESSAGE, ROLE_NOT_FOUND_MESSAGE, USER_NOT_FOUND_MESSAGE, fetch_permission,
    fetch_permissions, fetch_role, fetch_user,
};
pub use notification_ports::{NotificationSender, UserMessage};
pub use pagination::{
    DEFAULT_PAGE_SIZE, ListQuery, ListingDefaults, Page, PageSpec, parse_sort_field,
};
pub use permission_service::PermissionService;
pub use role_service::RoleService;
pub use user_service::UserService;
