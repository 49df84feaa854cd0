use std::cmp::Ordering;
use std::str::FromStr;

use mentor_core::{AppError, AppResult, NonEmptyString, ReasonCode};

use crate::sorting::SortField;

entity_id!(
    /// Unique identifier for a permission row.
    PermissionId
);

/// Named grant referenced by roles and by users' direct grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    id: PermissionId,
    name: NonEmptyString,
}

impl Permission {
    /// Rehydrates a persisted permission.
    pub fn new(id: PermissionId, name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
        })
    }

    /// Returns the permission identifier.
    #[must_use]
    pub fn id(&self) -> PermissionId {
        self.id
    }

    /// Returns the permission name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }
}

/// Permission that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionDraft {
    name: NonEmptyString,
}

impl PermissionDraft {
    /// Creates a validated permission draft.
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
        })
    }

    /// Returns the permission name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Attaches the store-assigned identifier.
    #[must_use]
    pub fn into_permission(self, id: PermissionId) -> Permission {
        Permission {
            id,
            name: self.name,
        }
    }
}

/// Sortable permission attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionSortField {
    /// Surrogate identifier.
    Id,
    /// Permission name.
    Name,
}

impl SortField for PermissionSortField {
    type Entity = Permission;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
        }
    }

    fn compare(&self, left: &Permission, right: &Permission) -> Ordering {
        let primary = match self {
            Self::Id => Ordering::Equal,
            Self::Name => left.name().as_str().cmp(right.name().as_str()),
        };

        primary.then_with(|| left.id().cmp(&right.id()))
    }
}

impl FromStr for PermissionSortField {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            other => Err(AppError::bad_request(
                ReasonCode::InvalidSortField,
                format!("unknown permission sort field '{other}'"),
            )),
        }
    }
}

/// Sorts by identifier and drops repeated identifiers.
pub(crate) fn normalize_permissions(mut permissions: Vec<Permission>) -> Vec<Permission> {
    permissions.sort_by_key(Permission::id);
    permissions.dedup_by_key(|permission| permission.id());
    permissions
}
