//! # LeaveSync Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Action classification of leave records
//! - The per-user leave window cache
//! - Port interfaces for the record service and calendar providers
//! - The notification pipeline and conflict detection service
//!
//! ## Architecture Principles
//! - Only depends on `leavesync-domain`
//! - No HTTP or storage code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod action;
pub mod cache;
pub mod conflicts;
pub mod errors;
pub mod gateway;
pub mod notifications;

// Ports
pub mod calendar_ports;
pub mod record_ports;

// Re-export specific items to avoid ambiguity
pub use cache::{LeaveWindowCache, LeaveWindowCacheConfig};
pub use calendar_ports::CalendarProvider;
pub use conflicts::ConflictDetectionService;
pub use errors::{LookupFailure, ProviderError, Severity, SyncError};
pub use gateway::{CalendarProviderGateway, FanOutReport, ProviderOutcome};
pub use notifications::{
    LoggingNotificationHandler, NotificationDispatcher, NotificationEndpoint, NotificationHandler,
};
pub use record_ports::LeaveRecordService;
