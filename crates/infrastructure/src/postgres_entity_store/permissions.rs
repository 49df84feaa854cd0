use mentor_application::{PERMISSION_NOT_FOUND_MESSAGE, Page, PageSpec};
use mentor_domain::{PermissionDraft, PermissionSortField};

use super::*;

fn permission_order_column(sort: PermissionSortField) -> &'static str {
    match sort {
        PermissionSortField::Id => "id",
        PermissionSortField::Name => "name COLLATE \"C\"",
    }
}

fn permission_name_error(name: &str, error: sqlx::Error) -> AppError {
    if is_unique_violation(&error) {
        return AppError::bad_request(
            ReasonCode::PermissionNameTaken,
            format!("permission name '{name}' is already taken"),
        );
    }

    database_error("failed to save permission", error)
}

#[async_trait]
impl PermissionRepository for PostgresUnitOfWork {
    async fn insert(&mut self, draft: PermissionDraft) -> AppResult<Permission> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO permissions (name)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(draft.name().as_str())
        .fetch_one(&mut *self.transaction)
        .await
        .map_err(|error| permission_name_error(draft.name().as_str(), error))?;

        Ok(draft.into_permission(PermissionId::new(id)))
    }

    async fn update(&mut self, permission: &Permission) -> AppResult<Permission> {
        let result = sqlx::query("UPDATE permissions SET name = $2 WHERE id = $1")
            .bind(permission.id().value())
            .bind(permission.name().as_str())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| permission_name_error(permission.name().as_str(), error))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                ReasonCode::PermissionNotFound,
                PERMISSION_NOT_FOUND_MESSAGE,
            ));
        }

        Ok(permission.clone())
    }

    async fn find_by_id(&mut self, permission_id: PermissionId) -> AppResult<Option<Permission>> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name
            FROM permissions
            WHERE id = $1
            FOR SHARE
            "#,
        )
        .bind(permission_id.value())
        .fetch_optional(&mut *self.transaction)
        .await
        .map_err(|error| database_error("failed to find permission", error))?;

        row.map(Permission::try_from).transpose()
    }

    async fn find_all(
        &mut self,
        spec: PageSpec<PermissionSortField>,
    ) -> AppResult<Page<Permission>> {
        let (rows, total) = self
            .fetch_window::<PermissionRow>(
                "permissions",
                "id, name",
                permission_order_column(spec.sort()),
                spec.window(),
                "failed to list permissions",
            )
            .await?;
        let permissions = rows
            .into_iter()
            .map(Permission::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(spec.page_of(permissions, total))
    }

    async fn delete_by_id(&mut self, permission_id: PermissionId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(permission_id.value())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| database_error("failed to delete permission", error))?;

        Ok(result.rows_affected() > 0)
    }
}
