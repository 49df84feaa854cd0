//! Console notification sender for development. Logs messages to tracing output.

use async_trait::async_trait;
use mentor_application::{NotificationSender, UserMessage};
use mentor_core::AppResult;
use tracing::info;

/// Development notification sender that logs messages to the console.
#[derive(Clone)]
pub struct ConsoleNotificationSender;

impl ConsoleNotificationSender {
    /// Creates a new console notification sender.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleNotificationSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSender for ConsoleNotificationSender {
    async fn send(&self, message: &UserMessage) -> AppResult<()> {
        info!(
            user_id = %message.user_id,
            "--- MESSAGE (console) ---\nTo: {}\n\n{}\n--- END MESSAGE ---",
            message.recipient,
            message.body
        );

        Ok(())
    }
}
