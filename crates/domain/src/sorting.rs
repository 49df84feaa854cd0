use std::cmp::Ordering;
use std::str::FromStr;

use mentor_core::AppError;

/// Sortable attribute of a persisted entity.
///
/// Orderings are ascending by the attribute and fall back to the identifier,
/// so page boundaries stay stable across repeated reads.
pub trait SortField: Copy + Send + Sync + FromStr<Err = AppError> + 'static {
    /// Entity type ordered by this attribute.
    type Entity;

    /// Returns the canonical attribute name.
    fn as_str(&self) -> &'static str;

    /// Compares two entities by this attribute, then by identifier.
    fn compare(&self, left: &Self::Entity, right: &Self::Entity) -> Ordering;
}
