//! Fetch-or-fail lookups.
//!
//! Every operation addressing an entity by identifier resolves it through
//! these helpers before doing anything else, so a missing row surfaces as a
//! typed `NotFound` failure and never as an absent value.

use mentor_core::{AppError, AppResult, ReasonCode};
use mentor_domain::{Permission, PermissionId, Role, RoleId, User, UserId};

use crate::entity_ports::UnitOfWork;

/// Message returned when a user identifier does not resolve.
pub const USER_NOT_FOUND_MESSAGE: &str = "user was not found";
/// Message returned when a role identifier does not resolve.
pub const ROLE_NOT_FOUND_MESSAGE: &str = "role was not found";
/// Message returned when a permission identifier does not resolve.
pub const PERMISSION_NOT_FOUND_MESSAGE: &str = "permission was not found";

/// Resolves a user or fails with `USER_NOT_FOUND`.
pub async fn fetch_user(unit: &mut dyn UnitOfWork, user_id: UserId) -> AppResult<User> {
    unit.users()
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(ReasonCode::UserNotFound, USER_NOT_FOUND_MESSAGE))
}

/// Resolves a role or fails with `ROLE_NOT_FOUND`.
pub async fn fetch_role(unit: &mut dyn UnitOfWork, role_id: RoleId) -> AppResult<Role> {
    unit.roles()
        .find_by_id(role_id)
        .await?
        .ok_or_else(|| AppError::not_found(ReasonCode::RoleNotFound, ROLE_NOT_FOUND_MESSAGE))
}

/// Resolves a permission or fails with `PERMISSION_NOT_FOUND`.
pub async fn fetch_permission(
    unit: &mut dyn UnitOfWork,
    permission_id: PermissionId,
) -> AppResult<Permission> {
    unit.permissions()
        .find_by_id(permission_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ReasonCode::PermissionNotFound,
                PERMISSION_NOT_FOUND_MESSAGE,
            )
        })
}

/// Resolves every permission in `permission_ids`, failing on the first miss.
pub async fn fetch_permissions(
    unit: &mut dyn UnitOfWork,
    permission_ids: &[PermissionId],
) -> AppResult<Vec<Permission>> {
    let mut permissions = Vec::with_capacity(permission_ids.len());
    for permission_id in permission_ids {
        permissions.push(fetch_permission(unit, *permission_id).await?);
    }

    Ok(permissions)
}
