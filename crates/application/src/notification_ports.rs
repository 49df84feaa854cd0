use async_trait::async_trait;

use mentor_core::AppResult;
use mentor_domain::UserId;

/// Message addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    /// Target user identifier.
    pub user_id: UserId,
    /// Display name of the target user at dispatch time.
    pub recipient: String,
    /// Message body.
    pub body: String,
}

/// Delivery collaborator for user messages.
///
/// Retry and delivery confirmation belong to implementations.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Dispatches one message.
    async fn send(&self, message: &UserMessage) -> AppResult<()>;
}
