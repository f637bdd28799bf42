//! Admin login.

use axum::{Json, Router, extract::State, routing::post};
use desa_core::auth::verify_password;
use desa_db::AdminRepository;
use desa_shared::{
    AppError,
    auth::{AdminInfo, LoginRequest, LoginResponse},
};
use tracing::{info, warn};

use crate::{AppState, error::ApiResult, extractors::ValidatedJson};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Email atau kata sandi salah".to_string())
}

/// POST /auth/login - Authenticate an admin and return an access token.
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let repo = AdminRepository::new((*state.db).clone());

    let Some(admin) = repo.find_active_by_email(&payload.email).await? else {
        info!(email = %payload.email, "Login attempt for unknown or disabled account");
        return Err(invalid_credentials().into());
    };

    if !verify_password(&payload.password, &admin.password_hash)? {
        warn!(admin_id = %admin.id, "Failed login attempt - invalid password");
        return Err(invalid_credentials().into());
    }

    let access_token = state
        .jwt_service
        .generate_access_token(admin.id, &admin.role)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    repo.touch_login(admin.id).await?;
    info!(admin_id = %admin.id, "Admin logged in");

    Ok(Json(LoginResponse {
        admin: AdminInfo {
            id: admin.id,
            email: admin.email,
            nama: admin.nama,
            role: admin.role,
        },
        access_token,
        token_type: "Bearer",
        expires_in: state.jwt_service.access_token_expires_in(),
    }))
}
