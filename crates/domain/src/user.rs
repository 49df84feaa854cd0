//! User domain types.
//!
//! A user references at most one role; assigning a role replaces the previous
//! reference. Directly granted permissions are tracked independently of the
//! permissions a role grants.

use std::cmp::Ordering;
use std::str::FromStr;

use mentor_core::{AppError, AppResult, NonEmptyString, ReasonCode};

use crate::permission::{Permission, PermissionId, normalize_permissions};
use crate::role::{Role, RoleId};
use crate::sorting::SortField;

entity_id!(
    /// Unique identifier for a user row.
    UserId
);

/// Persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    first_name: NonEmptyString,
    last_name: NonEmptyString,
    role: Option<Role>,
    permissions: Vec<Permission>,
}

impl User {
    /// Rehydrates a persisted user.
    pub fn new(
        id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: Option<Role>,
        permissions: Vec<Permission>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            first_name: NonEmptyString::new(first_name)?,
            last_name: NonEmptyString::new(last_name)?,
            role,
            permissions: normalize_permissions(permissions),
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &NonEmptyString {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &NonEmptyString {
        &self.last_name
    }

    /// Returns `"<first> <last>"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the assigned role, if any.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Returns the assigned role identifier, if any.
    #[must_use]
    pub fn role_id(&self) -> Option<RoleId> {
        self.role.as_ref().map(Role::id)
    }

    /// Returns directly granted permissions ordered by identifier.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Replaces the name pair.
    pub fn rename(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> AppResult<()> {
        let first_name = NonEmptyString::new(first_name)?;
        let last_name = NonEmptyString::new(last_name)?;
        self.first_name = first_name;
        self.last_name = last_name;
        Ok(())
    }

    /// Replaces the role reference.
    pub fn assign_role(&mut self, role: Role) {
        self.role = Some(role);
    }

    /// Drops the role reference.
    pub fn clear_role(&mut self) {
        self.role = None;
    }

    /// Grants a permission directly. Returns `false` when already granted.
    pub fn grant_permission(&mut self, permission: Permission) -> bool {
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

    /// Revokes a direct grant. Returns `false` when it was not granted.
    pub fn revoke_permission(&mut self, permission_id: PermissionId) -> bool {
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

/// User that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    first_name: NonEmptyString,
    last_name: NonEmptyString,
    role: Option<Role>,
    permissions: Vec<Permission>,
}

impl UserDraft {
    /// Creates a validated user draft.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: Option<Role>,
        permissions: Vec<Permission>,
    ) -> AppResult<Self> {
        Ok(Self {
            first_name: NonEmptyString::new(first_name)?,
            last_name: NonEmptyString::new(last_name)?,
            role,
            permissions: normalize_permissions(permissions),
        })
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &NonEmptyString {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &NonEmptyString {
        &self.last_name
    }

    /// Returns the initial role, if any.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Returns initial direct grants.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Attaches the store-assigned identifier.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            permissions: self.permissions,
        }
    }
}

/// Sortable user attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserSortField {
    /// Surrogate identifier.
    Id,
    /// First name.
    FirstName,
    /// Last name.
    LastName,
}

impl SortField for UserSortField {
    type Entity = User;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
        }
    }

    fn compare(&self, left: &User, right: &User) -> Ordering {
        let primary = match self {
            Self::Id => Ordering::Equal,
            Self::FirstName => left.first_name().as_str().cmp(right.first_name().as_str()),
            Self::LastName => left.last_name().as_str().cmp(right.last_name().as_str()),
        };

        primary.then_with(|| left.id().cmp(&right.id()))
    }
}

impl FromStr for UserSortField {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // camelCase aliases are accepted for older clients.
        match value.trim() {
            "id" => Ok(Self::Id),
            "first_name" | "firstName" => Ok(Self::FirstName),
            "last_name" | "lastName" => Ok(Self::LastName),
            other => Err(AppError::bad_request(
                ReasonCode::InvalidSortField,
                format!("unknown user sort field '{other}'"),
            )),
        }
    }
}
