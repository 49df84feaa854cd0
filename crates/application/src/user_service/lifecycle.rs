use super::*;

impl UserService {
    /// Creates a user. Role and direct grants may be empty.
    pub async fn create_user(&self, command: CreateUserCommand) -> AppResult<UserDto> {
        let mut unit = self.units.begin().await?;
        let result = async {
            let role = match command.role_id {
                Some(role_id) => Some(fetch_role(unit.as_mut(), role_id).await?),
                None => None,
            };
            let permissions = fetch_permissions(unit.as_mut(), &command.permission_ids).await?;
            let draft = user_draft(command, role, permissions)?;
            unit.users().insert(draft).await
        }
        .await;
        let user = finish(unit, result).await?;

        tracing::info!(user_id = %user.id(), "user '{}' was created", user.display_name());
        Ok(UserDto::from(user))
    }

    /// Renames a user.
    pub async fn update_user(
        &self,
        user_id: UserId,
        command: UpdateUserCommand,
    ) -> AppResult<UserDto> {
        let mut unit = self.units.begin().await?;
        let result = async {
            let mut user = fetch_user(unit.as_mut(), user_id).await?;
            user.rename(command.first_name, command.last_name)?;
            unit.users().update(&user).await
        }
        .await;
        let user = finish(unit, result).await?;

        tracing::info!(%user_id, "user '{}' was updated", user.display_name());
        Ok(UserDto::from(user))
    }

    /// Hard-deletes a user and returns its last known state.
    pub async fn remove_user(&self, user_id: UserId) -> AppResult<UserDto> {
        let mut unit = self.units.begin().await?;
        let result = async {
            let user = fetch_user(unit.as_mut(), user_id).await?;
            unit.users().delete_by_id(user_id).await?;
            Ok::<_, AppError>(user)
        }
        .await;
        let user = finish(unit, result).await?;

        tracing::info!(%user_id, "user '{}' was removed", user.display_name());
        Ok(UserDto::from(user))
    }
}
