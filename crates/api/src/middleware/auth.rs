//! Authentication middleware for admin routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use desa_core::auth::AdminRole;
use desa_shared::{AppError, Claims, JwtError};
use serde_json::json;

use crate::{AppState, error::ApiError};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

fn unauthorized(error: &str, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": error, "message": message })),
    )
        .into_response()
}

/// Validates the bearer token and stores its claims in request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return unauthorized("missing_token", "Silakan login terlebih dahulu");
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(JwtError::Expired) => unauthorized("token_expired", "Sesi telah berakhir, silakan login ulang"),
        Err(_) => unauthorized("invalid_token", "Token tidak valid"),
    }
}

/// Claims of the signed-in admin.
///
/// ```ignore
/// async fn handler(admin: AuthUser) -> impl IntoResponse {
///     let admin_id = admin.admin_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the admin ID from the claims.
    #[must_use]
    pub const fn admin_id(&self) -> uuid::Uuid {
        self.0.admin_id()
    }

    /// Returns the role carried by the token.
    #[must_use]
    pub fn role(&self) -> Option<AdminRole> {
        AdminRole::parse(&self.0.role)
    }

    /// Fails with 403 unless the role may delete records.
    pub fn require_delete(&self) -> Result<(), ApiError> {
        if self.role().is_some_and(|role| role.can_delete()) {
            Ok(())
        } else {
            Err(ApiError(AppError::Forbidden(
                "Hanya admin yang dapat menghapus data".to_string(),
            )))
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| unauthorized("unauthorized", "Silakan login terlebih dahulu"))
    }
}
