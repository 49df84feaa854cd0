use mentor_application::{Page, PageSpec, USER_NOT_FOUND_MESSAGE};
use mentor_domain::{SortField, User, UserDraft, UserId, UserSortField};

use super::*;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    role_id: Option<i64>,
}

fn user_order_column(sort: UserSortField) -> &'static str {
    match sort {
        UserSortField::Id => "id",
        UserSortField::FirstName => "first_name COLLATE \"C\"",
        UserSortField::LastName => "last_name COLLATE \"C\"",
    }
}

impl PostgresUnitOfWork {
    async fn load_users(&mut self, rows: Vec<UserRow>) -> AppResult<Vec<User>> {
        let mut role_ids: Vec<i64> = rows.iter().filter_map(|row| row.role_id).collect();
        role_ids.sort_unstable();
        role_ids.dedup();

        let role_rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name
            FROM roles
            WHERE id = ANY($1)
            "#,
        )
        .bind(role_ids)
        .fetch_all(&mut *self.transaction)
        .await
        .map_err(|error| database_error("failed to load user roles", error))?;
        let roles: HashMap<RoleId, Role> = self
            .load_roles(role_rows)
            .await?
            .into_iter()
            .map(|role| (role.id(), role))
            .collect();

        let user_ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut grants = self
            .load_owned_permissions(
                r#"
                SELECT user_permissions.user_id AS owner_id, permissions.id, permissions.name
                FROM user_permissions
                INNER JOIN permissions ON permissions.id = user_permissions.permission_id
                WHERE user_permissions.user_id = ANY($1)
                "#,
                user_ids,
            )
            .await?;

        rows.into_iter()
            .map(|row| {
                let role = row
                    .role_id
                    .and_then(|role_id| roles.get(&RoleId::new(role_id)).cloned());
                User::new(
                    UserId::new(row.id),
                    row.first_name,
                    row.last_name,
                    role,
                    grants.remove(&row.id).unwrap_or_default(),
                )
            })
            .collect()
    }

    async fn sync_user_permissions(&mut self, user_id: UserId, ids: Vec<i64>) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM user_permissions
            WHERE user_id = $1 AND NOT (permission_id = ANY($2))
            "#,
        )
        .bind(user_id.value())
        .bind(ids.clone())
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| database_error("failed to revoke user permissions", error))?;

        sqlx::query(
            r#"
            INSERT INTO user_permissions (user_id, permission_id)
            SELECT $1, granted.permission_id
            FROM UNNEST($2::BIGINT[]) AS granted(permission_id)
            ON CONFLICT (user_id, permission_id) DO NOTHING
            "#,
        )
        .bind(user_id.value())
        .bind(ids)
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| database_error("failed to grant user permissions", error))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUnitOfWork {
    async fn insert(&mut self, draft: UserDraft) -> AppResult<User> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (first_name, last_name, role_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(draft.first_name().as_str())
        .bind(draft.last_name().as_str())
        .bind(draft.role().map(|role| role.id().value()))
        .fetch_one(&mut *self.transaction)
        .await
        .map_err(|error| database_error("failed to insert user", error))?;

        let user_id = UserId::new(id);
        self.sync_user_permissions(user_id, permission_ids(draft.permissions()))
            .await?;

        Ok(draft.into_user(user_id))
    }

    async fn update(&mut self, user: &User) -> AppResult<User> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, role_id = $4
            WHERE id = $1
            "#,
        )
        .bind(user.id().value())
        .bind(user.first_name().as_str())
        .bind(user.last_name().as_str())
        .bind(user.role_id().map(|role_id| role_id.value()))
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| database_error("failed to update user", error))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                ReasonCode::UserNotFound,
                USER_NOT_FOUND_MESSAGE,
            ));
        }

        self.sync_user_permissions(user.id(), permission_ids(user.permissions()))
            .await?;

        Ok(user.clone())
    }

    async fn find_by_id(&mut self, user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, role_id
            FROM users
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&mut *self.transaction)
        .await
        .map_err(|error| database_error("failed to find user", error))?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.load_users(vec![row]).await?.pop())
    }

    async fn find_all(&mut self, spec: PageSpec<UserSortField>) -> AppResult<Page<User>> {
        let (rows, total) = self
            .fetch_window::<UserRow>(
                "users",
                "id, first_name, last_name, role_id",
                user_order_column(spec.sort()),
                spec.window(),
                &format!("failed to list users by {}", spec.sort().as_str()),
            )
            .await?;
        let users = self.load_users(rows).await?;

        Ok(spec.page_of(users, total))
    }

    async fn delete_by_id(&mut self, user_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.value())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| database_error("failed to delete user", error))?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_role(&mut self, role_id: RoleId) -> AppResult<u64> {
        let result = sqlx::query("UPDATE users SET role_id = NULL WHERE role_id = $1")
            .bind(role_id.value())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| database_error("failed to detach role from users", error))?;

        Ok(result.rows_affected())
    }
}
