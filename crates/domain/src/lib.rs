//! Domain entities and invariants.

#![forbid(unsafe_code)]

#[macro_use]
mod identifier;
mod group_weekend;
mod permission;
mod role;
mod sorting;
mod user;

pub use group_weekend::{GroupWeekend, GroupWeekendDraft, GroupWeekendId, GroupWeekendSortField};
pub use permission::{Permission, PermissionDraft, PermissionId, PermissionSortField};
pub use role::{Role, RoleDraft, RoleId, RoleSortField};
pub use sorting::SortField;
pub use user::{User, UserDraft, UserId, UserSortField};
