//! In-memory entity store used when no database is configured.
//!
//! A unit of work holds the store's write guard for its whole lifetime and
//! mutates a private copy of the tables. Commit swaps the copy in; rollback or
//! drop discards it. Identifier sequences live outside the copy, so an
//! identifier handed out by a rolled-back unit is never handed out again.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use mentor_application::{
    GroupWeekendRepository, PermissionRepository, RoleRepository, UnitOfWork, UnitOfWorkFactory,
    UserRepository,
};
use mentor_core::{AppError, AppResult, NonEmptyString, ReasonCode};
use mentor_domain::{
    GroupWeekend, GroupWeekendId, Permission, PermissionId, Role, RoleId, User, UserId,
};

mod group_weekends;
mod permissions;
mod roles;
mod users;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
struct UserRow {
    first_name: NonEmptyString,
    last_name: NonEmptyString,
    role_id: Option<RoleId>,
    permission_ids: BTreeSet<PermissionId>,
}

#[derive(Debug, Clone)]
struct RoleRow {
    name: NonEmptyString,
    permission_ids: BTreeSet<PermissionId>,
}

#[derive(Debug, Clone, Default)]
struct EntityTables {
    users: BTreeMap<UserId, UserRow>,
    roles: BTreeMap<RoleId, RoleRow>,
    permissions: BTreeMap<PermissionId, Permission>,
    group_weekends: BTreeMap<GroupWeekendId, GroupWeekend>,
}

#[derive(Debug, Default)]
struct Sequences {
    users: AtomicI64,
    roles: AtomicI64,
    permissions: AtomicI64,
    group_weekends: AtomicI64,
}

fn next_value(sequence: &AtomicI64) -> i64 {
    sequence.fetch_add(1, Ordering::SeqCst) + 1
}

/// In-memory implementation of the unit-of-work factory.
#[derive(Clone, Default)]
pub struct InMemoryEntityStore {
    tables: Arc<Mutex<EntityTables>>,
    sequences: Arc<Sequences>,
}

impl InMemoryEntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryEntityStore {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        let guard = self.tables.clone().lock_owned().await;
        let working = WorkingSet {
            tables: (*guard).clone(),
            sequences: self.sequences.clone(),
        };

        Ok(Box::new(InMemoryUnitOfWork { guard, working }))
    }
}

/// Unit of work over a private copy of the tables.
struct InMemoryUnitOfWork {
    guard: OwnedMutexGuard<EntityTables>,
    working: WorkingSet,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn users(&mut self) -> &mut dyn UserRepository {
        &mut self.working
    }

    fn roles(&mut self) -> &mut dyn RoleRepository {
        &mut self.working
    }

    fn permissions(&mut self) -> &mut dyn PermissionRepository {
        &mut self.working
    }

    fn group_weekends(&mut self) -> &mut dyn GroupWeekendRepository {
        &mut self.working
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let Self { mut guard, working } = *self;
        *guard = working.tables;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }
}

/// Tables visible to one unit of work.
struct WorkingSet {
    tables: EntityTables,
    sequences: Arc<Sequences>,
}

impl WorkingSet {
    fn permission(&self, permission_id: PermissionId) -> AppResult<Permission> {
        self.tables
            .permissions
            .get(&permission_id)
            .cloned()
            .ok_or_else(|| {
                AppError::internal(format!(
                    "permission '{permission_id}' is referenced but missing"
                ))
            })
    }

    fn hydrate_permissions(
        &self,
        permission_ids: &BTreeSet<PermissionId>,
    ) -> AppResult<Vec<Permission>> {
        permission_ids
            .iter()
            .map(|permission_id| self.permission(*permission_id))
            .collect()
    }

    fn hydrate_role(&self, role_id: RoleId, row: &RoleRow) -> AppResult<Role> {
        Role::new(
            role_id,
            row.name.as_str(),
            self.hydrate_permissions(&row.permission_ids)?,
        )
    }

    fn hydrate_user(&self, user_id: UserId, row: &UserRow) -> AppResult<User> {
        let role = match row.role_id {
            Some(role_id) => {
                let role_row = self.tables.roles.get(&role_id).ok_or_else(|| {
                    AppError::internal(format!("role '{role_id}' is referenced but missing"))
                })?;
                Some(self.hydrate_role(role_id, role_row)?)
            }
            None => None,
        };

        User::new(
            user_id,
            row.first_name.as_str(),
            row.last_name.as_str(),
            role,
            self.hydrate_permissions(&row.permission_ids)?,
        )
    }

    fn ensure_permissions_exist(
        &self,
        permissions: &[Permission],
    ) -> AppResult<BTreeSet<PermissionId>> {
        permissions
            .iter()
            .map(|permission| {
                if self.tables.permissions.contains_key(&permission.id()) {
                    Ok(permission.id())
                } else {
                    Err(dangling_reference(format!(
                        "permission '{}' does not exist",
                        permission.id()
                    )))
                }
            })
            .collect()
    }

    fn ensure_role_exists(&self, role: Option<&Role>) -> AppResult<Option<RoleId>> {
        match role {
            Some(role) if !self.tables.roles.contains_key(&role.id()) => Err(dangling_reference(
                format!("role '{}' does not exist", role.id()),
            )),
            Some(role) => Ok(Some(role.id())),
            None => Ok(None),
        }
    }
}

fn dangling_reference(message: String) -> AppError {
    AppError::conflict(ReasonCode::DanglingReference, message)
}
