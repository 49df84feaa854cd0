use super::*;

impl UserService {
    /// Hands a message for an existing user to the notification collaborator.
    ///
    /// Delivery failures surface as `MESSAGE_DELIVERY_FAILED`.
    pub async fn send_message(&self, command: UserMessageCommand) -> AppResult<()> {
        let body = command.body.trim();
        if body.is_empty() {
            return Err(AppError::validation("message body must not be empty"));
        }

        let mut unit = self.units.begin().await?;
        let result = fetch_user(unit.as_mut(), command.user_id).await;
        let user = finish(unit, result).await?;

        let message = UserMessage {
            user_id: user.id(),
            recipient: user.display_name(),
            body: body.to_owned(),
        };
        self.notifications.send(&message).await.map_err(|error| {
            tracing::error!(user_id = %user.id(), %error, "message delivery failed");
            AppError::Internal {
                reason: ReasonCode::MessageDeliveryFailed,
                message: format!("failed to deliver message: {}", error.message()),
            }
        })?;

        tracing::info!(user_id = %user.id(), "message dispatched");
        Ok(())
    }
}
