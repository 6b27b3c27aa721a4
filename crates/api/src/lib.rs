//! # LeaveSync API
//!
//! HTTP surface and main entry point.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - axum routes for notifications, conflicts and health
//! - Request correlation middleware
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod context;
pub mod routes;
pub mod utils;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};

pub use context::AppContext;

/// Router with every endpoint and the request id layer.
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/notifications", post(routes::receive_notifications))
        .route("/api/v1/conflicting/{user_id}", get(routes::conflicting_events))
        .route("/health", get(routes::health))
        .layer(middleware::from_fn(utils::request_id_middleware))
        .with_state(ctx)
}
