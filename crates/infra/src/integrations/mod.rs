//! External service integrations

pub mod auth;
pub mod google;
pub mod successfactors;

pub use auth::{AccessTokenProvider, StaticTokenProvider};
pub use google::GoogleCalendarProvider;
pub use successfactors::SuccessFactorsClient;
