//! HTTP handlers

pub mod conflicts;
pub mod health;
pub mod notifications;

pub use conflicts::{conflicting_events, ConflictsError};
pub use health::health;
pub use notifications::{receive_notifications, NotificationReply};
