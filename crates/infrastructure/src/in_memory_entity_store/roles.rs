use mentor_application::{Page, PageSpec, ROLE_NOT_FOUND_MESSAGE};
use mentor_domain::{RoleDraft, RoleSortField};

use super::*;

impl WorkingSet {
    fn ensure_role_name_free(
        &self,
        name: &NonEmptyString,
        except: Option<RoleId>,
    ) -> AppResult<()> {
        let taken = self
            .tables
            .roles
            .iter()
            .any(|(role_id, row)| Some(*role_id) != except && &row.name == name);
        if taken {
            return Err(AppError::bad_request(
                ReasonCode::RoleNameTaken,
                format!("role name '{name}' is already taken"),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl RoleRepository for WorkingSet {
    async fn insert(&mut self, draft: RoleDraft) -> AppResult<Role> {
        self.ensure_role_name_free(draft.name(), None)?;
        let row = RoleRow {
            name: draft.name().clone(),
            permission_ids: self.ensure_permissions_exist(draft.permissions())?,
        };
        let role_id = RoleId::new(next_value(&self.sequences.roles));

        self.tables.roles.insert(role_id, row.clone());
        self.hydrate_role(role_id, &row)
    }

    async fn update(&mut self, role: &Role) -> AppResult<Role> {
        if !self.tables.roles.contains_key(&role.id()) {
            return Err(AppError::not_found(
                ReasonCode::RoleNotFound,
                ROLE_NOT_FOUND_MESSAGE,
            ));
        }
        self.ensure_role_name_free(role.name(), Some(role.id()))?;

        let row = RoleRow {
            name: role.name().clone(),
            permission_ids: self.ensure_permissions_exist(role.permissions())?,
        };
        self.tables.roles.insert(role.id(), row.clone());
        self.hydrate_role(role.id(), &row)
    }

    async fn find_by_id(&mut self, role_id: RoleId) -> AppResult<Option<Role>> {
        self.tables
            .roles
            .get(&role_id)
            .map(|row| self.hydrate_role(role_id, row))
            .transpose()
    }

    async fn find_all(&mut self, spec: PageSpec<RoleSortField>) -> AppResult<Page<Role>> {
        let roles = self
            .tables
            .roles
            .iter()
            .map(|(role_id, row)| self.hydrate_role(*role_id, row))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(spec.apply(roles))
    }

    async fn delete_by_id(&mut self, role_id: RoleId) -> AppResult<bool> {
        if self.tables.roles.remove(&role_id).is_none() {
            return Ok(false);
        }

        // Same effect as the `ON DELETE SET NULL` foreign key.
        for row in self.tables.users.values_mut() {
            if row.role_id == Some(role_id) {
                row.role_id = None;
            }
        }

        Ok(true)
    }
}
