use super::*;

impl RoleService {
    /// Deletes a role and detaches it from every user that referenced it.
    ///
    /// Detaching and deleting happen in one unit of work, so no user is ever
    /// observed pointing at a deleted role.
    pub async fn remove_role(&self, role_id: RoleId) -> AppResult<RoleDto> {
        let mut unit = self.units.begin().await?;
        let result = async {
            let role = fetch_role(unit.as_mut(), role_id).await?;
            let detached = unit.users().clear_role(role_id).await?;
            unit.roles().delete_by_id(role_id).await?;
            Ok::<_, AppError>((role, detached))
        }
        .await;
        let (role, detached) = finish(unit, result).await?;

        tracing::info!(
            %role_id,
            detached_users = detached,
            "role '{}' was removed",
            role.name()
        );
        Ok(RoleDto::from(role))
    }
}
