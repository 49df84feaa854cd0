use mentor_application::{Page, PageSpec, USER_NOT_FOUND_MESSAGE};
use mentor_domain::{UserDraft, UserSortField};

use super::*;

#[async_trait]
impl UserRepository for WorkingSet {
    async fn insert(&mut self, draft: UserDraft) -> AppResult<User> {
        let row = UserRow {
            first_name: draft.first_name().clone(),
            last_name: draft.last_name().clone(),
            role_id: self.ensure_role_exists(draft.role())?,
            permission_ids: self.ensure_permissions_exist(draft.permissions())?,
        };
        let user_id = UserId::new(next_value(&self.sequences.users));

        self.tables.users.insert(user_id, row.clone());
        self.hydrate_user(user_id, &row)
    }

    async fn update(&mut self, user: &User) -> AppResult<User> {
        if !self.tables.users.contains_key(&user.id()) {
            return Err(AppError::not_found(
                ReasonCode::UserNotFound,
                USER_NOT_FOUND_MESSAGE,
            ));
        }

        let row = UserRow {
            first_name: user.first_name().clone(),
            last_name: user.last_name().clone(),
            role_id: self.ensure_role_exists(user.role())?,
            permission_ids: self.ensure_permissions_exist(user.permissions())?,
        };
        self.tables.users.insert(user.id(), row.clone());
        self.hydrate_user(user.id(), &row)
    }

    async fn find_by_id(&mut self, user_id: UserId) -> AppResult<Option<User>> {
        self.tables
            .users
            .get(&user_id)
            .map(|row| self.hydrate_user(user_id, row))
            .transpose()
    }

    async fn find_all(&mut self, spec: PageSpec<UserSortField>) -> AppResult<Page<User>> {
        let users = self
            .tables
            .users
            .iter()
            .map(|(user_id, row)| self.hydrate_user(*user_id, row))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(spec.apply(users))
    }

    async fn delete_by_id(&mut self, user_id: UserId) -> AppResult<bool> {
        Ok(self.tables.users.remove(&user_id).is_some())
    }

    async fn clear_role(&mut self, role_id: RoleId) -> AppResult<u64> {
        let mut cleared = 0;
        for row in self.tables.users.values_mut() {
            if row.role_id == Some(role_id) {
                row.role_id = None;
                cleared += 1;
            }
        }

        Ok(cleared)
    }
}
