use std::cmp::Ordering;
use std::str::FromStr;

use mentor_core::{AppError, AppResult, NonEmptyString, ReasonCode};

use crate::permission::{Permission, PermissionId, normalize_permissions};
use crate::sorting::SortField;

entity_id!(
    /// Unique identifier for a role row.
    RoleId
);

/// Named role owning a set of permission references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    id: RoleId,
    name: NonEmptyString,
    permissions: Vec<Permission>,
}

impl Role {
    /// Rehydrates a persisted role.
    pub fn new(
        id: RoleId,
        name: impl Into<String>,
        permissions: Vec<Permission>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            permissions: normalize_permissions(permissions),
        })
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns granted permissions ordered by identifier.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Returns whether the role grants the permission.
    #[must_use]
    pub fn has_permission(&self, permission_id: PermissionId) -> bool {
        self.permissions
            .binary_search_by_key(&permission_id, Permission::id)
            .is_ok()
    }

    /// Adds a permission reference. Returns `false` when it was already present.
    pub fn add_permission(&mut self, permission: Permission) -> bool {
        match self
            .permissions
            .binary_search_by_key(&permission.id(), Permission::id)
        {
            Ok(_) => false,
            Err(position) => {
                self.permissions.insert(position, permission);
                true
            }
        }
    }

    /// Removes a permission reference. Returns `false` when it was absent.
    pub fn remove_permission(&mut self, permission_id: PermissionId) -> bool {
        match self
            .permissions
            .binary_search_by_key(&permission_id, Permission::id)
        {
            Ok(position) => {
                self.permissions.remove(position);
                true
            }
            Err(_) => false,
        }
    }
}

/// Role that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDraft {
    name: NonEmptyString,
    permissions: Vec<Permission>,
}

impl RoleDraft {
    /// Creates a validated role draft.
    pub fn new(name: impl Into<String>, permissions: Vec<Permission>) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            permissions: normalize_permissions(permissions),
        })
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns initial permissions.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Attaches the store-assigned identifier.
    #[must_use]
    pub fn into_role(self, id: RoleId) -> Role {
        Role {
            id,
            name: self.name,
            permissions: self.permissions,
        }
    }
}

/// Sortable role attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleSortField {
    /// Surrogate identifier.
    Id,
    /// Role name.
    Name,
}

impl SortField for RoleSortField {
    type Entity = Role;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
        }
    }

    fn compare(&self, left: &Role, right: &Role) -> Ordering {
        let primary = match self {
            Self::Id => Ordering::Equal,
            Self::Name => left.name().as_str().cmp(right.name().as_str()),
        };

        primary.then_with(|| left.id().cmp(&right.id()))
    }
}

impl FromStr for RoleSortField {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            other => Err(AppError::bad_request(
                ReasonCode::InvalidSortField,
                format!("unknown role sort field '{other}'"),
            )),
        }
    }
}
