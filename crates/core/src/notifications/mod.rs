//! Notification reconciliation pipeline

pub mod dispatcher;
pub mod endpoint;
pub mod response;

pub use dispatcher::NotificationDispatcher;
pub use endpoint::{LoggingNotificationHandler, NotificationEndpoint, NotificationHandler};
