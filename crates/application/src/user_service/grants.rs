use super::*;

impl UserService {
    /// Replaces the role of a user.
    ///
    /// The user lookup, role lookup and user write commit together.
    pub async fn change_permission(&self, user_id: UserId, role_id: RoleId) -> AppResult<UserDto> {
        let mut unit = self.units.begin().await?;
        let result = async {
            let mut user = fetch_user(unit.as_mut(), user_id).await?;
            let role = fetch_role(unit.as_mut(), role_id).await?;
            user.assign_role(role);
            unit.users().update(&user).await
        }
        .await;
        let user = finish(unit, result).await?;

        tracing::info!(%user_id, %role_id, "role of user '{}' was changed", user.display_name());
        Ok(UserDto::from(user))
    }

    /// Grants a permission directly to a user. Granting twice is a no-op.
    pub async fn grant_permission_to_user(
        &self,
        user_id: UserId,
        permission_id: PermissionId,
    ) -> AppResult<UserDto> {
        let mut unit = self.units.begin().await?;
        let result = async {
            let mut user = fetch_user(unit.as_mut(), user_id).await?;
            let permission = fetch_permission(unit.as_mut(), permission_id).await?;
            if !user.grant_permission(permission) {
                return Ok(user);
            }
            unit.users().update(&user).await
        }
        .await;

        finish(unit, result).await.map(UserDto::from)
    }

    /// Revokes a direct grant from a user. Revoking an absent grant is a no-op.
    pub async fn revoke_permission_from_user(
        &self,
        user_id: UserId,
        permission_id: PermissionId,
    ) -> AppResult<UserDto> {
        let mut unit = self.units.begin().await?;
        let result = async {
            let mut user = fetch_user(unit.as_mut(), user_id).await?;
            fetch_permission(unit.as_mut(), permission_id).await?;
            if !user.revoke_permission(permission_id) {
                return Ok(user);
            }
            unit.users().update(&user).await
        }
        .await;

        finish(unit, result).await.map(UserDto::from)
    }
}
