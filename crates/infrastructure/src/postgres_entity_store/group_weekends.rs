use chrono::Weekday;

use mentor_application::{Page, PageSpec};
use mentor_domain::{GroupWeekend, GroupWeekendDraft, GroupWeekendId, GroupWeekendSortField};

use super::*;

#[derive(Debug, sqlx::FromRow)]
struct GroupWeekendRow {
    id: i64,
    group_id: i64,
    weekend: i16,
}

impl TryFrom<GroupWeekendRow> for GroupWeekend {
    type Error = AppError;

    fn try_from(row: GroupWeekendRow) -> Result<Self, Self::Error> {
        Ok(GroupWeekend::new(
            GroupWeekendId::new(row.id),
            row.group_id,
            weekday_from_column(row.weekend)?,
        ))
    }
}

/// Stored as days from Monday (`0..=6`).
fn weekday_to_column(weekday: Weekday) -> i16 {
    i16::try_from(weekday.num_days_from_monday()).unwrap_or_default()
}

fn weekday_from_column(value: i16) -> AppResult<Weekday> {
    match value {
        0 => Ok(Weekday::Mon),
        1 => Ok(Weekday::Tue),
        2 => Ok(Weekday::Wed),
        3 => Ok(Weekday::Thu),
        4 => Ok(Weekday::Fri),
        5 => Ok(Weekday::Sat),
        6 => Ok(Weekday::Sun),
        other => Err(AppError::internal(format!(
            "stored weekend value '{other}' is out of range"
        ))),
    }
}

fn group_weekend_order_column(sort: GroupWeekendSortField) -> &'static str {
    match sort {
        GroupWeekendSortField::Id => "id",
        GroupWeekendSortField::GroupId => "group_id",
    }
}

#[async_trait]
impl GroupWeekendRepository for PostgresUnitOfWork {
    async fn insert(&mut self, draft: GroupWeekendDraft) -> AppResult<GroupWeekend> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO group_weekends (group_id, weekend)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(draft.group_id())
        .bind(weekday_to_column(draft.weekend()))
        .fetch_one(&mut *self.transaction)
        .await
        .map_err(|error| database_error("failed to insert group weekend", error))?;

        Ok(draft.into_group_weekend(GroupWeekendId::new(id)))
    }

    async fn update(&mut self, group_weekend: &GroupWeekend) -> AppResult<GroupWeekend> {
        let result =
            sqlx::query("UPDATE group_weekends SET group_id = $2, weekend = $3 WHERE id = $1")
                .bind(group_weekend.id().value())
                .bind(group_weekend.group_id())
                .bind(weekday_to_column(group_weekend.weekend()))
                .execute(&mut *self.transaction)
                .await
                .map_err(|error| database_error("failed to update group weekend", error))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                ReasonCode::GroupWeekendNotFound,
                "group weekend was not found",
            ));
        }

        Ok(*group_weekend)
    }

    async fn find_by_id(
        &mut self,
        group_weekend_id: GroupWeekendId,
    ) -> AppResult<Option<GroupWeekend>> {
        let row = sqlx::query_as::<_, GroupWeekendRow>(
            r#"
            SELECT id, group_id, weekend
            FROM group_weekends
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(group_weekend_id.value())
        .fetch_optional(&mut *self.transaction)
        .await
        .map_err(|error| database_error("failed to find group weekend", error))?;

        row.map(GroupWeekend::try_from).transpose()
    }

    async fn find_all(
        &mut self,
        spec: PageSpec<GroupWeekendSortField>,
    ) -> AppResult<Page<GroupWeekend>> {
        let (rows, total) = self
            .fetch_window::<GroupWeekendRow>(
                "group_weekends",
                "id, group_id, weekend",
                group_weekend_order_column(spec.sort()),
                spec.window(),
                "failed to list group weekends",
            )
            .await?;
        let group_weekends = rows
            .into_iter()
            .map(GroupWeekend::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(spec.page_of(group_weekends, total))
    }

    async fn delete_by_id(&mut self, group_weekend_id: GroupWeekendId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM group_weekends WHERE id = $1")
            .bind(group_weekend_id.value())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| database_error("failed to delete group weekend", error))?;

        Ok(result.rows_affected() > 0)
    }
}
