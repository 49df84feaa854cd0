use std::cmp::Ordering;
use std::str::FromStr;

use chrono::Weekday;
use mentor_core::{AppError, AppResult, ReasonCode};

use crate::sorting::SortField;

entity_id!(
    /// Unique identifier for a group weekend association row.
    GroupWeekendId
);

/// Association row marking a weekday as a weekend for a study group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupWeekend {
    id: GroupWeekendId,
    group_id: i64,
    weekend: Weekday,
}

impl GroupWeekend {
    /// Rehydrates a persisted association row.
    #[must_use]
    pub fn new(id: GroupWeekendId, group_id: i64, weekend: Weekday) -> Self {
        Self {
            id,
            group_id,
            weekend,
        }
    }

    /// Returns the row identifier.
    #[must_use]
    pub fn id(&self) -> GroupWeekendId {
        self.id
    }

    /// Returns the referenced group identifier.
    #[must_use]
    pub fn group_id(&self) -> i64 {
        self.group_id
    }

    /// Returns the weekday treated as a weekend.
    #[must_use]
    pub fn weekend(&self) -> Weekday {
        self.weekend
    }
}

/// Association row that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupWeekendDraft {
    group_id: i64,
    weekend: Weekday,
}

impl GroupWeekendDraft {
    /// Creates a draft for a positive group identifier.
    pub fn new(group_id: i64, weekend: Weekday) -> AppResult<Self> {
        if group_id <= 0 {
            return Err(AppError::validation(
                "group identifier must be a positive integer",
            ));
        }

        Ok(Self { group_id, weekend })
    }

    /// Returns the referenced group identifier.
    #[must_use]
    pub fn group_id(&self) -> i64 {
        self.group_id
    }

    /// Returns the weekday treated as a weekend.
    #[must_use]
    pub fn weekend(&self) -> Weekday {
        self.weekend
    }

    /// Attaches the store-assigned identifier.
    #[must_use]
    pub fn into_group_weekend(self, id: GroupWeekendId) -> GroupWeekend {
        GroupWeekend::new(id, self.group_id, self.weekend)
    }
}

/// Sortable group weekend attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupWeekendSortField {
    /// Surrogate identifier.
    Id,
    /// Referenced group identifier.
    GroupId,
}

impl SortField for GroupWeekendSortField {
    type Entity = GroupWeekend;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::GroupId => "group_id",
        }
    }

    fn compare(&self, left: &GroupWeekend, right: &GroupWeekend) -> Ordering {
        let primary = match self {
            Self::Id => Ordering::Equal,
            Self::GroupId => left.group_id().cmp(&right.group_id()),
        };

        primary.then_with(|| left.id().cmp(&right.id()))
    }
}

impl FromStr for GroupWeekendSortField {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "id" => Ok(Self::Id),
            "group_id" | "groupId" => Ok(Self::GroupId),
            other => Err(AppError::bad_request(
                ReasonCode::InvalidSortField,
                format!("unknown group weekend sort field '{other}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::GroupWeekendDraft;

    #[test]
    fn non_positive_group_is_rejected() {
        assert!(GroupWeekendDraft::new(0, Weekday::Sat).is_err());
        assert!(GroupWeekendDraft::new(3, Weekday::Sun).is_ok());
    }
}
