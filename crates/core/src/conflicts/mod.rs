//! Conflict detection between leave windows and calendar events

pub mod service;

pub use service::ConflictDetectionService;
