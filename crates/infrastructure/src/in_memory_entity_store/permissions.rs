use mentor_application::{PERMISSION_NOT_FOUND_MESSAGE, Page, PageSpec};
use mentor_domain::{PermissionDraft, PermissionSortField};

use super::*;

impl WorkingSet {
    fn ensure_permission_name_free(
        &self,
        name: &NonEmptyString,
        except: Option<PermissionId>,
    ) -> AppResult<()> {
        let taken = self
            .tables
            .permissions
            .values()
            .any(|permission| Some(permission.id()) != except && permission.name() == name);
        if taken {
            return Err(AppError::bad_request(
                ReasonCode::PermissionNameTaken,
                format!("permission name '{name}' is already taken"),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl PermissionRepository for WorkingSet {
    async fn insert(&mut self, draft: PermissionDraft) -> AppResult<Permission> {
        self.ensure_permission_name_free(draft.name(), None)?;
        let permission_id = PermissionId::new(next_value(&self.sequences.permissions));
        let permission = draft.into_permission(permission_id);

        self.tables
            .permissions
            .insert(permission_id, permission.clone());
        Ok(permission)
    }

    async fn update(&mut self, permission: &Permission) -> AppResult<Permission> {
        if !self.tables.permissions.contains_key(&permission.id()) {
            return Err(AppError::not_found(
                ReasonCode::PermissionNotFound,
                PERMISSION_NOT_FOUND_MESSAGE,
            ));
        }
        self.ensure_permission_name_free(permission.name(), Some(permission.id()))?;

        self.tables
            .permissions
            .insert(permission.id(), permission.clone());
        Ok(permission.clone())
    }

    async fn find_by_id(&mut self, permission_id: PermissionId) -> AppResult<Option<Permission>> {
        Ok(self.tables.permissions.get(&permission_id).cloned())
    }

    async fn find_all(
        &mut self,
        spec: PageSpec<PermissionSortField>,
    ) -> AppResult<Page<Permission>> {
        Ok(spec.apply(self.tables.permissions.values().cloned().collect()))
    }

    async fn delete_by_id(&mut self, permission_id: PermissionId) -> AppResult<bool> {
        if self.tables.permissions.remove(&permission_id).is_none() {
            return Ok(false);
        }

        for row in self.tables.roles.values_mut() {
            row.permission_ids.remove(&permission_id);
        }
        for row in self.tables.users.values_mut() {
            row.permission_ids.remove(&permission_id);
        }

        Ok(true)
    }
}
