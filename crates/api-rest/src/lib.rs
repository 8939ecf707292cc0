//! # API REST
//!
//! REST API implementation for CardioScan.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - wire DTOs (camelCase JSON, matching the dashboard client)
//! - bearer-token authentication for protected routes
//! - mapping of domain errors to HTTP statuses with generic bodies
//!
//! Uses `cardioscan-core` for all domain logic and `api-shared` for tokens
//! and health checks. Server boot (address, CORS, Swagger UI) lives in the
//! run binary.

#![warn(rust_2018_idioms)]

pub mod dto;
pub mod error;
mod extract;
pub mod handlers;
mod state;

pub use error::ApiError;
pub use extract::AuthUser;
pub use state::AppState;

use axum::routing::{get, patch, post};
use axum::Router;

/// Builds the CardioScan REST router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth", post(handlers::login))
        .route("/users", post(handlers::register))
        .route("/users/profile", get(handlers::get_profile))
        .route("/users/profile", patch(handlers::update_profile))
        .route("/reports", get(handlers::list_reports))
        .route("/reports", post(handlers::create_report))
        .route("/reports/stats", get(handlers::report_stats))
        .route("/reports/:id/export", get(handlers::export_report))
        .with_state(state)
}
