//! Google Calendar and Gmail integration

pub mod provider;
pub mod types;

pub use provider::GoogleCalendarProvider;
