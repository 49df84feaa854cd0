use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Stable machine-readable reason attached to every [`crate::AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// User identifier did not resolve.
    UserNotFound,
    /// Role identifier did not resolve.
    RoleNotFound,
    /// Permission identifier did not resolve.
    PermissionNotFound,
    /// Group weekend association did not resolve.
    GroupWeekendNotFound,
    /// Requested sort attribute is not sortable.
    InvalidSortField,
    /// Requested page size is not a positive integer.
    InvalidPageSize,
    /// Generic input validation failure.
    InvalidInput,
    /// Another role already uses the requested name.
    RoleNameTaken,
    /// Another permission already uses the requested name.
    PermissionNameTaken,
    /// Write referenced a row that no longer exists.
    DanglingReference,
    /// Concurrent operation changed the same rows first.
    ConcurrentUpdate,
    /// Notification collaborator rejected the message.
    MessageDeliveryFailed,
    /// Unexpected failure.
    InternalError,
}

impl ReasonCode {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RoleNotFound => "ROLE_NOT_FOUND",
            Self::PermissionNotFound => "PERMISSION_NOT_FOUND",
            Self::GroupWeekendNotFound => "GROUP_WEEKEND_NOT_FOUND",
            Self::InvalidSortField => "INVALID_SORT_FIELD",
            Self::InvalidPageSize => "INVALID_PAGE_SIZE",
            Self::InvalidInput => "INVALID_INPUT",
            Self::RoleNameTaken => "ROLE_NAME_TAKEN",
            Self::PermissionNameTaken => "PERMISSION_NAME_TAKEN",
            Self::DanglingReference => "DANGLING_REFERENCE",
            Self::ConcurrentUpdate => "CONCURRENT_UPDATE",
            Self::MessageDeliveryFailed => "MESSAGE_DELIVERY_FAILED",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl Display for ReasonCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}
