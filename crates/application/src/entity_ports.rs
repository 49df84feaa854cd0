use async_trait::async_trait;

use mentor_core::AppResult;
use mentor_domain::{
    GroupWeekend, GroupWeekendDraft, GroupWeekendId, GroupWeekendSortField, Permission,
    PermissionDraft, PermissionId, PermissionSortField, Role, RoleDraft, RoleId, RoleSortField,
    User, UserDraft, UserId, UserSortField,
};

use crate::pagination::{Page, PageSpec};

/// Repository port for user rows and their direct permission grants.
#[async_trait]
pub trait UserRepository: Send {
    /// Persists a new user and returns it with its assigned identifier.
    async fn insert(&mut self, draft: UserDraft) -> AppResult<User>;

    /// Persists the current state of an existing user.
    async fn update(&mut self, user: &User) -> AppResult<User>;

    /// Finds a user by identifier.
    async fn find_by_id(&mut self, user_id: UserId) -> AppResult<Option<User>>;

    /// Lists users in the requested order and window.
    async fn find_all(&mut self, spec: PageSpec<UserSortField>) -> AppResult<Page<User>>;

    /// Deletes a user. Returns `false` when nothing was deleted.
    async fn delete_by_id(&mut self, user_id: UserId) -> AppResult<bool>;

    /// Clears the role reference on every user holding `role_id`.
    async fn clear_role(&mut self, role_id: RoleId) -> AppResult<u64>;
}

/// Repository port for roles and their permission associations.
#[async_trait]
pub trait RoleRepository: Send {
    /// Persists a new role and returns it with its assigned identifier.
    async fn insert(&mut self, draft: RoleDraft) -> AppResult<Role>;

    /// Persists the current name and permission set of an existing role.
    async fn update(&mut self, role: &Role) -> AppResult<Role>;

    /// Finds a role by identifier.
    async fn find_by_id(&mut self, role_id: RoleId) -> AppResult<Option<Role>>;

    /// Lists roles in the requested order and window.
    async fn find_all(&mut self, spec: PageSpec<RoleSortField>) -> AppResult<Page<Role>>;

    /// Deletes a role. Returns `false` when nothing was deleted.
    async fn delete_by_id(&mut self, role_id: RoleId) -> AppResult<bool>;
}

/// Repository port for permissions.
#[async_trait]
pub trait PermissionRepository: Send {
    /// Persists a new permission and returns it with its assigned identifier.
    async fn insert(&mut self, draft: PermissionDraft) -> AppResult<Permission>;

    /// Persists the current name of an existing permission.
    async fn update(&mut self, permission: &Permission) -> AppResult<Permission>;

    /// Finds a permission by identifier.
    async fn find_by_id(&mut self, permission_id: PermissionId) -> AppResult<Option<Permission>>;

    /// Lists permissions in the requested order and window.
    async fn find_all(
        &mut self,
        spec: PageSpec<PermissionSortField>,
    ) -> AppResult<Page<Permission>>;

    /// Deletes a permission and every association row pointing at it.
    async fn delete_by_id(&mut self, permission_id: PermissionId) -> AppResult<bool>;
}

/// Repository port for group weekend association rows.
#[async_trait]
pub trait GroupWeekendRepository: Send {
    /// Persists a new association row.
    async fn insert(&mut self, draft: GroupWeekendDraft) -> AppResult<GroupWeekend>;

    /// Persists the current state of an existing association row.
    async fn update(&mut self, group_weekend: &GroupWeekend) -> AppResult<GroupWeekend>;

    /// Finds an association row by identifier.
    async fn find_by_id(
        &mut self,
        group_weekend_id: GroupWeekendId,
    ) -> AppResult<Option<GroupWeekend>>;

    /// Lists association rows in the requested order and window.
    async fn find_all(
        &mut self,
        spec: PageSpec<GroupWeekendSortField>,
    ) -> AppResult<Page<GroupWeekend>>;

    /// Deletes an association row. Returns `false` when nothing was deleted.
    async fn delete_by_id(&mut self, group_weekend_id: GroupWeekendId) -> AppResult<bool>;
}

/// Transactional scope shared by every repository an operation touches.
///
/// Writes become visible to other units only after [`UnitOfWork::commit`].
/// Dropping a unit without committing discards its writes.
#[async_trait]
pub trait UnitOfWork: Send {
    /// Returns the user repository bound to this unit.
    fn users(&mut self) -> &mut dyn UserRepository;

    /// Returns the role repository bound to this unit.
    fn roles(&mut self) -> &mut dyn RoleRepository;

    /// Returns the permission repository bound to this unit.
    fn permissions(&mut self) -> &mut dyn PermissionRepository;

    /// Returns the group weekend repository bound to this unit.
    fn group_weekends(&mut self) -> &mut dyn GroupWeekendRepository;

    /// Makes every write of this unit durable.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Discards every write of this unit.
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Opens units of work against an entity store.
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    /// Begins a new unit of work.
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>>;
}

/// Commits `unit` when `result` is `Ok`, rolls it back otherwise.
///
/// The operation error wins over a rollback error; a failed commit replaces
/// the successful result.
pub async fn finish<T>(unit: Box<dyn UnitOfWork>, result: AppResult<T>) -> AppResult<T> {
    match result {
        Ok(value) => {
            unit.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = unit.rollback().await {
                tracing::warn!(
                    error = %rollback_error,
                    "failed to roll back unit of work after operation error"
                );
            }
            Err(error)
        }
    }
}
