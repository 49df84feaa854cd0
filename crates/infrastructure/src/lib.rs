//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_notification_sender;
mod in_memory_entity_store;
mod postgres_entity_store;

pub use console_notification_sender::ConsoleNotificationSender;
pub use in_memory_entity_store::InMemoryEntityStore;
pub use postgres_entity_store::PostgresEntityStore;
