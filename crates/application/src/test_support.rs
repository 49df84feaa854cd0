//! In-process fakes shared by the service test modules.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use mentor_core::{AppError, AppResult, ReasonCode};
use mentor_domain::{
    GroupWeekend, GroupWeekendDraft, GroupWeekendId, GroupWeekendSortField, Permission,
    PermissionDraft, PermissionId, PermissionSortField, Role, RoleDraft, RoleId, RoleSortField,
    User, UserDraft, UserId, UserSortField,
};

use crate::entity_ports::{
    GroupWeekendRepository, PermissionRepository, RoleRepository, UnitOfWork, UnitOfWorkFactory,
    UserRepository,
};
use crate::notification_ports::{NotificationSender, UserMessage};
use crate::pagination::{Page, PageSpec};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTables {
    users: BTreeMap<UserId, User>,
    roles: BTreeMap<RoleId, Role>,
    permissions: BTreeMap<PermissionId, Permission>,
    group_weekends: BTreeMap<GroupWeekendId, GroupWeekend>,
    fail_user_updates: bool,
    next_id: Arc<AtomicI64>,
}

impl FakeTables {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn hydrate(&self, mut user: User) -> User {
        match user.role_id().and_then(|role_id| self.roles.get(&role_id)) {
            Some(role) => user.assign_role(role.clone()),
            None => user.clear_role(),
        }
        user
    }
}

/// Entity store fake with commit and rollback counters.
pub(crate) struct FakeStore {
    tables: Arc<Mutex<FakeTables>>,
    fail_user_updates: AtomicBool,
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
}

impl FakeStore {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            tables: Arc::new(Mutex::new(FakeTables::default())),
            fail_user_updates: AtomicBool::new(false),
            commits: Arc::new(AtomicUsize::new(0)),
            rollbacks: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub(crate) fn fail_user_updates(&self) {
        self.fail_user_updates.store(true, Ordering::SeqCst);
    }

    pub(crate) fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub(crate) fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }

    pub(crate) async fn user_count(&self) -> usize {
        self.tables.lock().await.users.len()
    }

    pub(crate) async fn stored_user(&self, user_id: UserId) -> Option<User> {
        let tables = self.tables.lock().await;
        tables
            .users
            .get(&user_id)
            .cloned()
            .map(|user| tables.hydrate(user))
    }

    pub(crate) async fn stored_role(&self, role_id: RoleId) -> Option<Role> {
        self.tables.lock().await.roles.get(&role_id).cloned()
    }
}

#[async_trait]
impl UnitOfWorkFactory for FakeStore {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        let guard = self.tables.clone().lock_owned().await;
        let mut working = (*guard).clone();
        working.fail_user_updates = self.fail_user_updates.load(Ordering::SeqCst);

        Ok(Box::new(FakeUnit {
            guard,
            working,
            commits: self.commits.clone(),
            rollbacks: self.rollbacks.clone(),
        }))
    }
}

struct FakeUnit {
    guard: OwnedMutexGuard<FakeTables>,
    working: FakeTables,
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
}

#[async_trait]
impl UnitOfWork for FakeUnit {
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
        let Self {
            mut guard,
            working,
            commits,
            ..
        } = *self;
        *guard = working;
        commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FakeTables {
    async fn insert(&mut self, draft: UserDraft) -> AppResult<User> {
        let user = draft.into_user(UserId::new(self.next_id()));
        self.users.insert(user.id(), user.clone());
        Ok(user)
    }

    async fn update(&mut self, user: &User) -> AppResult<User> {
        if self.fail_user_updates {
            return Err(AppError::internal("injected user update failure"));
        }
        if !self.users.contains_key(&user.id()) {
            return Err(AppError::not_found(ReasonCode::UserNotFound, "user was not found"));
        }
        self.users.insert(user.id(), user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&mut self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .get(&user_id)
            .cloned()
            .map(|user| self.hydrate(user)))
    }

    async fn find_all(&mut self, spec: PageSpec<UserSortField>) -> AppResult<Page<User>> {
        let rows = self
            .users
            .values()
            .cloned()
            .map(|user| self.hydrate(user))
            .collect();
        Ok(spec.apply(rows))
    }

    async fn delete_by_id(&mut self, user_id: UserId) -> AppResult<bool> {
        Ok(self.users.remove(&user_id).is_some())
    }

    async fn clear_role(&mut self, role_id: RoleId) -> AppResult<u64> {
        let mut cleared = 0;
        for user in self.users.values_mut() {
            if user.role_id() == Some(role_id) {
                user.clear_role();
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}

#[async_trait]
impl RoleRepository for FakeTables {
    async fn insert(&mut self, draft: RoleDraft) -> AppResult<Role> {
        if self
            .roles
            .values()
            .any(|role| role.name() == draft.name())
        {
            return Err(AppError::bad_request(
                ReasonCode::RoleNameTaken,
                "role name is already taken",
            ));
        }
        let role = draft.into_role(RoleId::new(self.next_id()));
        self.roles.insert(role.id(), role.clone());
        Ok(role)
    }

    async fn update(&mut self, role: &Role) -> AppResult<Role> {
        self.roles.insert(role.id(), role.clone());
        Ok(role.clone())
    }

    async fn find_by_id(&mut self, role_id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.roles.get(&role_id).cloned())
    }

    async fn find_all(&mut self, spec: PageSpec<RoleSortField>) -> AppResult<Page<Role>> {
        Ok(spec.apply(self.roles.values().cloned().collect()))
    }

    async fn delete_by_id(&mut self, role_id: RoleId) -> AppResult<bool> {
        Ok(self.roles.remove(&role_id).is_some())
    }
}

#[async_trait]
impl PermissionRepository for FakeTables {
    async fn insert(&mut self, draft: PermissionDraft) -> AppResult<Permission> {
        if self
            .permissions
            .values()
            .any(|permission| permission.name() == draft.name())
        {
            return Err(AppError::bad_request(
                ReasonCode::PermissionNameTaken,
                "permission name is already taken",
            ));
        }
        let permission = draft.into_permission(PermissionId::new(self.next_id()));
        self.permissions.insert(permission.id(), permission.clone());
        Ok(permission)
    }

    async fn update(&mut self, permission: &Permission) -> AppResult<Permission> {
        self.permissions.insert(permission.id(), permission.clone());
        Ok(permission.clone())
    }

    async fn find_by_id(&mut self, permission_id: PermissionId) -> AppResult<Option<Permission>> {
        Ok(self.permissions.get(&permission_id).cloned())
    }

    async fn find_all(
        &mut self,
        spec: PageSpec<PermissionSortField>,
    ) -> AppResult<Page<Permission>> {
        Ok(spec.apply(self.permissions.values().cloned().collect()))
    }

    async fn delete_by_id(&mut self, permission_id: PermissionId) -> AppResult<bool> {
        Ok(self.permissions.remove(&permission_id).is_some())
    }
}

#[async_trait]
impl GroupWeekendRepository for FakeTables {
    async fn insert(&mut self, draft: GroupWeekendDraft) -> AppResult<GroupWeekend> {
        let row = draft.into_group_weekend(GroupWeekendId::new(self.next_id()));
        self.group_weekends.insert(row.id(), row);
        Ok(row)
    }

    async fn update(&mut self, group_weekend: &GroupWeekend) -> AppResult<GroupWeekend> {
        self.group_weekends
            .insert(group_weekend.id(), *group_weekend);
        Ok(*group_weekend)
    }

    async fn find_by_id(
        &mut self,
        group_weekend_id: GroupWeekendId,
    ) -> AppResult<Option<GroupWeekend>> {
        Ok(self.group_weekends.get(&group_weekend_id).copied())
    }

    async fn find_all(
        &mut self,
        spec: PageSpec<GroupWeekendSortField>,
    ) -> AppResult<Page<GroupWeekend>> {
        Ok(spec.apply(self.group_weekends.values().copied().collect()))
    }

    async fn delete_by_id(&mut self, group_weekend_id: GroupWeekendId) -> AppResult<bool> {
        Ok(self.group_weekends.remove(&group_weekend_id).is_some())
    }
}

/// Notification sender fake that records messages or fails on demand.
#[derive(Default)]
pub(crate) struct RecordingNotificationSender {
    sent: Mutex<Vec<UserMessage>>,
    fail: AtomicBool,
}

impl RecordingNotificationSender {
    pub(crate) fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(true),
        }
    }

    pub(crate) async fn sent(&self) -> Vec<UserMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl NotificationSender for RecordingNotificationSender {
    async fn send(&self, message: &UserMessage) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::internal("mail relay unavailable"));
        }
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}
