use super::*;

impl RoleService {
    /// Grants a permission to a role. Granting twice keeps a single reference.
    pub async fn add_permission_to_role(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<RoleDto> {
        let mut unit = self.units.begin().await?;
        let result = async {
            let mut role = fetch_role(unit.as_mut(), role_id).await?;
            let permission = fetch_permission(unit.as_mut(), permission_id).await?;
            if !role.add_permission(permission) {
                return Ok(role);
            }
            unit.roles().update(&role).await
        }
        .await;
        let role = finish(unit, result).await?;

        tracing::info!(%role_id, %permission_id, "permission granted to role");
        Ok(RoleDto::from(role))
    }

    /// Revokes a permission from a role. Revoking an absent permission is a no-op.
    pub async fn remove_permission_in_role(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<RoleDto> {
        let mut unit = self.units.begin().await?;
        let result = async {
            let mut role = fetch_role(unit.as_mut(), role_id).await?;
            fetch_permission(unit.as_mut(), permission_id).await?;
            if !role.remove_permission(permission_id) {
                return Ok(role);
            }
            unit.roles().update(&role).await
        }
        .await;
        let role = finish(unit, result).await?;

        tracing::info!(%role_id, %permission_id, "permission revoked from role");
        Ok(RoleDto::from(role))
    }
}
