//! Domain types and models

pub mod calendar;
pub mod leave;
pub mod notification;

pub use calendar::{CalendarEvent, EventStatus};
pub use leave::{Action, ApprovalStatus, LeaveRecord, LeaveRecordSource, LeaveWindowList, UserRef};
pub use notification::{AlertResponse, EntityKey, NotificationBatch, NotificationEvent};
