use super::*;

impl UserService {
    /// Returns one user or fails with `USER_NOT_FOUND`.
    pub async fn get_user_by_id(&self, user_id: UserId) -> AppResult<UserDto> {
        let mut unit = self.units.begin().await?;
        let result = fetch_user(unit.as_mut(), user_id).await;
        finish(unit, result).await.map(UserDto::from)
    }

    /// Returns one page of users.
    ///
    /// Page `0` skips pagination and returns every user. Pages `1..` return at
    /// most `size` users starting at `page * size`.
    pub async fn get_all_users(&self, query: ListQuery) -> AppResult<Page<UserDto>> {
        let spec = PageSpec::<UserSortField>::resolve(
            &query,
            self.listing.page_size(),
            self.listing.user_sort(),
        )?;

        let mut unit = self.units.begin().await?;
        let result = unit.users().find_all(spec).await;
        finish(unit, result).await.map(|page| page.map(UserDto::from))
    }

    /// Returns every user ordered by the configured default sort.
    pub async fn list_all(&self) -> AppResult<Vec<UserDto>> {
        let page = self.get_all_users(ListQuery::default()).await?;
        Ok(page.into_items())
    }

    /// Takes a snapshot of every user for export renderers.
    pub async fn export_users(&self) -> AppResult<UserListExport> {
        let users = self.list_all().await?;

        tracing::info!(users = users.len(), "user list exported");
        Ok(UserListExport {
            generated_at: Utc::now(),
            users,
        })
    }
}
