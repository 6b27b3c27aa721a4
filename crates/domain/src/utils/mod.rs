//! Domain utilities

pub mod messages;
pub mod timezone;
