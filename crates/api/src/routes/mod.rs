//! API route definitions.

use axum::{Router, middleware};
use serde::Serialize;

use crate::{AppState, middleware::auth::auth_middleware};

pub mod apbdes;
pub mod auth;
pub mod dusun;
pub mod health;
pub mod kependudukan;
pub mod layanan;
pub mod umkm;

#[cfg(test)]
pub(crate) mod test_support;

/// Body of responses that carry only a confirmation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Wraps a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Creates the API router. Everything under `/admin` needs a bearer token.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .merge(apbdes::admin_routes())
        .merge(kependudukan::admin_routes())
        .merge(umkm::admin_routes())
        .merge(dusun::admin_routes())
        .merge(layanan::admin_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(apbdes::routes())
        .merge(kependudukan::routes())
        .merge(umkm::routes())
        .merge(dusun::routes())
        .merge(layanan::routes())
        .nest("/admin", admin_routes)
}
