//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - Public read endpoints and the CAPTCHA-guarded letter form
//! - Admin REST endpoints behind bearer-token authentication
//! - Request extractors
//! - Error responses

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use desa_core::captcha::CaptchaVerifier;
use desa_shared::{JwtService, LetterheadConfig};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Checks CAPTCHA tokens on public submissions.
    pub captcha: Arc<dyn CaptchaVerifier>,
    /// Village identity printed on generated letters.
    pub letterhead: Arc<LetterheadConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
