//! PostgreSQL-backed entity store.
//!
//! Each unit of work owns one database transaction. Lookups by identifier take
//! a row lock (`FOR UPDATE`) on the root row, so two operations mutating the
//! same entity serialize instead of overwriting each other.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction};

use mentor_application::{
    GroupWeekendRepository, PermissionRepository, RoleRepository, UnitOfWork, UnitOfWorkFactory,
    UserRepository,
};
use mentor_core::{AppError, AppResult, ReasonCode};
use mentor_domain::{Permission, PermissionId, Role, RoleId};

mod group_weekends;
mod permissions;
mod roles;
mod users;


/// PostgreSQL implementation of the unit-of-work factory.
#[derive(Clone)]
pub struct PostgresEntityStore {
    pool: PgPool,
}

impl PostgresEntityStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWorkFactory for PostgresEntityStore {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        let transaction = self
            .pool
            .begin()
            .await
            .map_err(|error| database_error("failed to begin transaction", error))?;

        Ok(Box::new(PostgresUnitOfWork { transaction }))
    }
}

/// Unit of work bound to one PostgreSQL transaction.
struct PostgresUnitOfWork {
    transaction: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    fn users(&mut self) -> &mut dyn UserRepository {
        self
    }

    fn roles(&mut self) -> &mut dyn RoleRepository {
        self
    }

    fn permissions(&mut self) -> &mut dyn PermissionRepository {
        self
    }

    fn group_weekends(&mut self) -> &mut dyn GroupWeekendRepository {
        self
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.transaction
            .commit()
            .await
            .map_err(|error| database_error("failed to commit transaction", error))
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.transaction
            .rollback()
            .await
            .map_err(|error| database_error("failed to roll back transaction", error))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PermissionRow {
    id: i64,
    name: String,
}

impl TryFrom<PermissionRow> for Permission {
    type Error = AppError;

    fn try_from(row: PermissionRow) -> Result<Self, Self::Error> {
        Permission::new(PermissionId::new(row.id), row.name)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OwnedPermissionRow {
    owner_id: i64,
    id: i64,
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct RoleRow {
    id: i64,
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct CountRow {
    total: i64,
}

impl PostgresUnitOfWork {
    /// Loads roles with their permissions, keyed by identifier.
    async fn load_roles(&mut self, rows: Vec<RoleRow>) -> AppResult<Vec<Role>> {
        let role_ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut permissions = self
            .load_owned_permissions(
                r#"
                SELECT role_permissions.role_id AS owner_id, permissions.id, permissions.name
                FROM role_permissions
                INNER JOIN permissions ON permissions.id = role_permissions.permission_id
                WHERE role_permissions.role_id = ANY($1)
                "#,
                role_ids,
            )
            .await?;

        rows.into_iter()
            .map(|row| {
                let granted = permissions.remove(&row.id).unwrap_or_default();
                Role::new(RoleId::new(row.id), row.name, granted)
            })
            .collect()
    }

    /// Runs a permission query returning `(owner_id, id, name)` rows and
    /// groups the permissions by owner.
    async fn load_owned_permissions(
        &mut self,
        query: &str,
        owner_ids: Vec<i64>,
    ) -> AppResult<HashMap<i64, Vec<Permission>>> {
        if owner_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, OwnedPermissionRow>(query)
            .bind(owner_ids)
            .fetch_all(&mut *self.transaction)
            .await
            .map_err(|error| database_error("failed to load granted permissions", error))?;

        let mut grouped: HashMap<i64, Vec<Permission>> = HashMap::new();
        for row in rows {
            let permission = Permission::new(PermissionId::new(row.id), row.name)?;
            grouped.entry(row.owner_id).or_default().push(permission);
        }

        Ok(grouped)
    }

    /// Reads one ordered window of `table` together with the table's row count.
    ///
    /// The count comes from `COUNT(*) OVER ()` in the same statement, so rows and
    /// total share one snapshot. An empty window carries no count and falls back
    /// to a separate `COUNT(*)`.
    async fn fetch_window<R>(
        &mut self,
        table: &str,
        columns: &str,
        order_column: &str,
        window: Option<(u64, u32)>,
        context: &str,
    ) -> AppResult<(Vec<R>, u64)>
    where
        R: for<'r> FromRow<'r, PgRow> + Send,
    {
        let query = format!(
            "SELECT {columns}, COUNT(*) OVER () AS total FROM {table} ORDER BY {order_column}, id {}",
            window_clause(window)
        );
        let rows = sqlx::query(&query)
            .fetch_all(&mut *self.transaction)
            .await
            .map_err(|error| database_error(context, error))?;

        let total = match rows.first() {
            Some(row) => row
                .try_get::<i64, _>("total")
                .map_err(|error| database_error(context, error))?,
            None if window.is_some() => {
                sqlx::query_as::<_, CountRow>(&format!("SELECT COUNT(*) AS total FROM {table}"))
                    .fetch_one(&mut *self.transaction)
                    .await
                    .map_err(|error| database_error(context, error))?
                    .total
            }
            None => 0,
        };

        let entities = rows
            .iter()
            .map(R::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| database_error(context, error))?;

        Ok((entities, u64::try_from(total).unwrap_or_default()))
    }
}

/// Returns identifiers as the `BIGINT[]` bind value used by association queries.
fn permission_ids(permissions: &[Permission]) -> Vec<i64> {
    permissions
        .iter()
        .map(|permission| permission.id().value())
        .collect()
}

/// Returns the `LIMIT`/`OFFSET` clause for a window, or nothing for unpaged reads.
fn window_clause(window: Option<(u64, u32)>) -> String {
    match window {
        Some((offset, limit)) => format!("LIMIT {limit} OFFSET {offset}"),
        None => String::new(),
    }
}

/// Maps a store failure into the application error taxonomy.
fn database_error(context: &str, error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(database_error) = &error {
        match database_error.code().as_deref() {
            Some("40001") | Some("40P01") => {
                return AppError::conflict(
                    ReasonCode::ConcurrentUpdate,
                    "a concurrent operation changed the same rows, retry the request",
                );
            }
            Some("23503") => {
                return AppError::conflict(
                    ReasonCode::DanglingReference,
                    "write references a row that no longer exists",
                );
            }
            _ => {}
        }
    }

    AppError::internal(format!("{context}: {error}"))
}

/// Returns whether a failure is a unique-constraint violation.
fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(database_error)
            if database_error.code().as_deref() == Some("23505")
    )
}
