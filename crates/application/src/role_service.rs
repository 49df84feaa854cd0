//! Role lifecycle and role-permission association.

use std::sync::Arc;

use mentor_core::{AppError, AppResult};
use mentor_domain::{PermissionId, RoleId, RoleSortField};

use crate::dto::{CreateRoleCommand, PermissionDto, RoleDto, role_draft};
use crate::entity_ports::{UnitOfWorkFactory, finish};
use crate::fetch::{fetch_permission, fetch_permissions, fetch_role};
use crate::pagination::{ListQuery, ListingDefaults, Page, PageSpec};

mod associations;
mod removal;

#[cfg(test)]
mod tests;

/// Application service for roles.
#[derive(Clone)]
pub struct RoleService {
    units: Arc<dyn UnitOfWorkFactory>,
    listing: ListingDefaults,
}

impl RoleService {
    /// Creates a new role service.
    #[must_use]
    pub fn new(units: Arc<dyn UnitOfWorkFactory>, listing: ListingDefaults) -> Self {
        Self { units, listing }
    }

    /// Creates a role with the referenced permissions.
    pub async fn create_role(&self, command: CreateRoleCommand) -> AppResult<RoleDto> {
        let mut unit = self.units.begin().await?;
        let result = async {
            let permissions = fetch_permissions(unit.as_mut(), &command.permission_ids).await?;
            let draft = role_draft(command, permissions)?;
            unit.roles().insert(draft).await
        }
        .await;
        let role = finish(unit, result).await?;

        tracing::info!(role_id = %role.id(), "role '{}' was created", role.name());
        Ok(RoleDto::from(role))
    }

    /// Returns one role or fails with `ROLE_NOT_FOUND`.
    pub async fn get_role_by_id(&self, role_id: RoleId) -> AppResult<RoleDto> {
        let mut unit = self.units.begin().await?;
        let result = fetch_role(unit.as_mut(), role_id).await;
        finish(unit, result).await.map(RoleDto::from)
    }

    /// Returns one page of roles.
    pub async fn get_all_roles(&self, query: ListQuery) -> AppResult<Page<RoleDto>> {
        let spec = PageSpec::<RoleSortField>::resolve(
            &query,
            self.listing.page_size(),
            self.listing.role_sort(),
        )?;

        let mut unit = self.units.begin().await?;
        let result = unit.roles().find_all(spec).await;
        finish(unit, result).await.map(|page| page.map(RoleDto::from))
    }

    /// Returns the permissions granted through one role.
    pub async fn get_role_permissions(&self, role_id: RoleId) -> AppResult<Vec<PermissionDto>> {
        let role = self.get_role_by_id(role_id).await?;
        Ok(role.permissions)
    }
}
