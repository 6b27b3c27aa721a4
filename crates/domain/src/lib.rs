//! # LeaveSync Domain
//!
//! Business domain types and models for LeaveSync.
//!
//! This crate contains:
//! - Leave records, calendar events and notification payloads
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Time zone resolution and auto-reply composition
//!
//! ## Architecture
//! - No dependencies on other LeaveSync crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::messages::auto_reply_message;
pub use utils::timezone::{parse_zone, resolve_user_zone};
