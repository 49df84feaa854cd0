use mentor_application::{Page, PageSpec, ROLE_NOT_FOUND_MESSAGE};
use mentor_domain::{RoleDraft, RoleSortField};

use super::*;

fn role_order_column(sort: RoleSortField) -> &'static str {
    match sort {
        RoleSortField::Id => "id",
        RoleSortField::Name => "name COLLATE \"C\"",
    }
}

fn role_name_error(name: &str, error: sqlx::Error) -> AppError {
    if is_unique_violation(&error) {
        return AppError::bad_request(
            ReasonCode::RoleNameTaken,
            format!("role name '{name}' is already taken"),
        );
    }

    database_error("failed to save role", error)
}

impl PostgresUnitOfWork {
    async fn sync_role_permissions(&mut self, role_id: RoleId, ids: Vec<i64>) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM role_permissions
            WHERE role_id = $1 AND NOT (permission_id = ANY($2))
            "#,
        )
        .bind(role_id.value())
        .bind(ids.clone())
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| database_error("failed to revoke role permissions", error))?;

        sqlx::query(
            r#"
            INSERT INTO role_permissions (role_id, permission_id)
            SELECT $1, granted.permission_id
            FROM UNNEST($2::BIGINT[]) AS granted(permission_id)
            ON CONFLICT (role_id, permission_id) DO NOTHING
            "#,
        )
        .bind(role_id.value())
        .bind(ids)
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| database_error("failed to grant role permissions", error))?;

        Ok(())
    }
}

#[async_trait]
impl RoleRepository for PostgresUnitOfWork {
    async fn insert(&mut self, draft: RoleDraft) -> AppResult<Role> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO roles (name)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(draft.name().as_str())
        .fetch_one(&mut *self.transaction)
        .await
        .map_err(|error| role_name_error(draft.name().as_str(), error))?;

        let role_id = RoleId::new(id);
        self.sync_role_permissions(role_id, permission_ids(draft.permissions()))
            .await?;

        Ok(draft.into_role(role_id))
    }

    async fn update(&mut self, role: &Role) -> AppResult<Role> {
        let result = sqlx::query("UPDATE roles SET name = $2 WHERE id = $1")
            .bind(role.id().value())
            .bind(role.name().as_str())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| role_name_error(role.name().as_str(), error))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                ReasonCode::RoleNotFound,
                ROLE_NOT_FOUND_MESSAGE,
            ));
        }

        self.sync_role_permissions(role.id(), permission_ids(role.permissions()))
            .await?;

        Ok(role.clone())
    }

    async fn find_by_id(&mut self, role_id: RoleId) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name
            FROM roles
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(role_id.value())
        .fetch_optional(&mut *self.transaction)
        .await
        .map_err(|error| database_error("failed to find role", error))?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.load_roles(vec![row]).await?.pop())
    }

    async fn find_all(&mut self, spec: PageSpec<RoleSortField>) -> AppResult<Page<Role>> {
        let (rows, total) = self
            .fetch_window::<RoleRow>(
                "roles",
                "id, name",
                role_order_column(spec.sort()),
                spec.window(),
                "failed to list roles",
            )
            .await?;
        let roles = self.load_roles(rows).await?;

        Ok(spec.page_of(roles, total))
    }

    async fn delete_by_id(&mut self, role_id: RoleId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(role_id.value())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| database_error("failed to delete role", error))?;

        Ok(result.rows_affected() > 0)
    }
}
