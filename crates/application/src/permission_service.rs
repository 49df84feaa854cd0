use std::sync::Arc;

use mentor_core::AppResult;
use mentor_domain::{PermissionId, PermissionSortField};

use crate::dto::{CreatePermissionCommand, PermissionDto, permission_draft};
use crate::entity_ports::{UnitOfWorkFactory, finish};
use crate::fetch::fetch_permission;
use crate::pagination::PageSpec;

/// Application service for the permission catalog.
#[derive(Clone)]
pub struct PermissionService {
    units: Arc<dyn UnitOfWorkFactory>,
}

impl PermissionService {
    /// Creates a new permission service.
    #[must_use]
    pub fn new(units: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { units }
    }

    /// Creates a permission with a unique name.
    pub async fn create_permission(
        &self,
        command: CreatePermissionCommand,
    ) -> AppResult<PermissionDto> {
        let draft = permission_draft(command)?;

        let mut unit = self.units.begin().await?;
        let result = unit.permissions().insert(draft).await;
        let permission = finish(unit, result).await?;

        tracing::info!(
            permission_id = %permission.id(),
            "permission '{}' was created",
            permission.name()
        );
        Ok(PermissionDto::from(permission))
    }

    /// Returns one permission or fails with `PERMISSION_NOT_FOUND`.
    pub async fn get_permission_by_id(
        &self,
        permission_id: PermissionId,
    ) -> AppResult<PermissionDto> {
        let mut unit = self.units.begin().await?;
        let result = fetch_permission(unit.as_mut(), permission_id).await;
        finish(unit, result).await.map(PermissionDto::from)
    }

    /// Returns every permission ordered by name.
    pub async fn get_all_permissions(&self) -> AppResult<Vec<PermissionDto>> {
        let spec = PageSpec::Unpaged {
            sort: PermissionSortField::Name,
        };

        let mut unit = self.units.begin().await?;
        let result = unit.permissions().find_all(spec).await;
        let page = finish(unit, result).await?;

        Ok(page.into_items().into_iter().map(PermissionDto::from).collect())
    }
}
