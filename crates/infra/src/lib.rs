//! # LeaveSync Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP client with retry and backoff
//! - SuccessFactors record service (OData v2)
//! - Google Calendar / Gmail provider
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `leavesync-core`
//! - Contains all "impure" code (network, environment, files)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod observability;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::{
    AccessTokenProvider, GoogleCalendarProvider, StaticTokenProvider, SuccessFactorsClient,
};
pub use observability::init_tracing;
