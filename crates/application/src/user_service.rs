//! User lifecycle, role and permission assignment, listing, and messaging.
//!
//! Every operation runs inside one unit of work opened from the configured
//! factory. Lookups by identifier go through the fetch-or-fail helpers before
//! any write, so an unknown identifier never leaves partial state behind.

use std::sync::Arc;

use chrono::Utc;

use mentor_core::{AppError, AppResult, ReasonCode};
use mentor_domain::{PermissionId, RoleId, UserId, UserSortField};

use crate::dto::{
    CreateUserCommand, UpdateUserCommand, UserDto, UserListExport, UserMessageCommand, user_draft,
};
use crate::entity_ports::{UnitOfWorkFactory, finish};
use crate::fetch::{fetch_permission, fetch_permissions, fetch_role, fetch_user};
use crate::notification_ports::{NotificationSender, UserMessage};
use crate::pagination::{ListQuery, ListingDefaults, Page, PageSpec};

mod grants;
mod lifecycle;
mod messaging;
mod retrieval;


/// Application service for users.
#[derive(Clone)]
pub struct UserService {
    units: Arc<dyn UnitOfWorkFactory>,
    notifications: Arc<dyn NotificationSender>,
    listing: ListingDefaults,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        units: Arc<dyn UnitOfWorkFactory>,
        notifications: Arc<dyn NotificationSender>,
        listing: ListingDefaults,
    ) -> Self {
        Self {
            units,
            notifications,
            listing,
        }
    }
}
