use std::sync::Arc;

use mentor_application::{
    ListingDefaults, NotificationSender, PermissionService, RoleService, UnitOfWorkFactory,
    UserService,
};
use mentor_infrastructure::{ConsoleNotificationSender, InMemoryEntityStore, PostgresEntityStore};
use sqlx::PgPool;

use crate::state::AppState;

/// Selects the entity store backing every service.
pub enum EntityStoreChoice {
    Postgres(PgPool),
    InMemory,
}

pub fn build_app_state(store: EntityStoreChoice, listing: ListingDefaults) -> AppState {
    let units: Arc<dyn UnitOfWorkFactory> = match store {
        EntityStoreChoice::Postgres(pool) => Arc::new(PostgresEntityStore::new(pool)),
        EntityStoreChoice::InMemory => Arc::new(InMemoryEntityStore::new()),
    };
    let notifications: Arc<dyn NotificationSender> = Arc::new(ConsoleNotificationSender::new());

    AppState {
        role_service: RoleService::new(units.clone(), listing),
        permission_service: PermissionService::new(units.clone()),
        user_service: UserService::new(units, notifications, listing),
    }
}
