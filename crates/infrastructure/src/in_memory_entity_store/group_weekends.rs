use mentor_application::{Page, PageSpec};
use mentor_domain::{GroupWeekendDraft, GroupWeekendSortField};

use super::*;

#[async_trait]
impl GroupWeekendRepository for WorkingSet {
    async fn insert(&mut self, draft: GroupWeekendDraft) -> AppResult<GroupWeekend> {
        let group_weekend_id = GroupWeekendId::new(next_value(&self.sequences.group_weekends));
        let group_weekend = draft.into_group_weekend(group_weekend_id);

        self.tables
            .group_weekends
            .insert(group_weekend_id, group_weekend);
        Ok(group_weekend)
    }

    async fn update(&mut self, group_weekend: &GroupWeekend) -> AppResult<GroupWeekend> {
        let Some(stored) = self.tables.group_weekends.get_mut(&group_weekend.id()) else {
            return Err(AppError::not_found(
                ReasonCode::GroupWeekendNotFound,
                "group weekend was not found",
            ));
        };

        *stored = *group_weekend;
        Ok(*group_weekend)
    }

    async fn find_by_id(
        &mut self,
        group_weekend_id: GroupWeekendId,
    ) -> AppResult<Option<GroupWeekend>> {
        Ok(self.tables.group_weekends.get(&group_weekend_id).copied())
    }

    async fn find_all(
        &mut self,
        spec: PageSpec<GroupWeekendSortField>,
    ) -> AppResult<Page<GroupWeekend>> {
        Ok(spec.apply(self.tables.group_weekends.values().copied().collect()))
    }

    async fn delete_by_id(&mut self, group_weekend_id: GroupWeekendId) -> AppResult<bool> {
        Ok(self.tables.group_weekends.remove(&group_weekend_id).is_some())
    }
}
