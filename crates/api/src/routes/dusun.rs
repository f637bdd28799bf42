//! Hamlet profile routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use desa_core::dusun::{DusunInput, DusunProfile};
use desa_db::{DusunRepository, RepositoryError};
use desa_shared::{AppError, types::DusunId};
use tracing::info;

use super::MessageResponse;
use crate::{AppState, error::ApiResult, extractors::ValidatedJson, middleware::AuthUser};

/// Public routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dusun", get(list))
        .route("/dusun/{id}", get(get_one))
}

/// Admin routes.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dusun", get(admin_list).post(create))
        .route(
            "/dusun/{id}",
            get(admin_get).put(update).delete(delete_one),
        )
}

fn not_found() -> AppError {
    AppError::NotFound("Dusun tidak ditemukan".to_string())
}

fn map_error(error: RepositoryError) -> AppError {
    match error {
        RepositoryError::NotFound => not_found(),
        other => other.into(),
    }
}

async fn all(state: &AppState) -> ApiResult<Vec<DusunProfile>> {
    Ok(DusunRepository::new((*state.db).clone()).list().await?)
}

async fn find(state: &AppState, id: DusunId) -> ApiResult<DusunProfile> {
    Ok(DusunRepository::new((*state.db).clone())
        .find(id)
        .await?
        .ok_or_else(not_found)?)
}

/// GET /dusun
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<DusunProfile>>> {
    Ok(Json(all(&state).await?))
}

/// GET /dusun/{id}
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<DusunId>,
) -> ApiResult<Json<DusunProfile>> {
    Ok(Json(find(&state, id).await?))
}

/// GET /admin/dusun
async fn admin_list(
    State(state): State<AppState>,
    _admin: AuthUser,
) -> ApiResult<Json<Vec<DusunProfile>>> {
    Ok(Json(all(&state).await?))
}

/// GET /admin/dusun/{id}
async fn admin_get(
    State(state): State<AppState>,
    _admin: AuthUser,
    Path(id): Path<DusunId>,
) -> ApiResult<Json<DusunProfile>> {
    Ok(Json(find(&state, id).await?))
}

/// POST /admin/dusun
async fn create(
    State(state): State<AppState>,
    admin: AuthUser,
    ValidatedJson(input): ValidatedJson<DusunInput>,
) -> ApiResult<(StatusCode, Json<DusunProfile>)> {
    let profile = DusunRepository::new((*state.db).clone())
        .create(&input)
        .await?;

    info!(dusun_id = %profile.id, nama = %profile.data.nama, admin_id = %admin.admin_id(), "Dusun created");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// PUT /admin/dusun/{id}
async fn update(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<DusunId>,
    ValidatedJson(input): ValidatedJson<DusunInput>,
) -> ApiResult<Json<DusunProfile>> {
    let profile = DusunRepository::new((*state.db).clone())
        .update(id, &input)
        .await
        .map_err(map_error)?;

    info!(dusun_id = %id, admin_id = %admin.admin_id(), "Dusun updated");
    Ok(Json(profile))
}

/// DELETE /admin/dusun/{id}
async fn delete_one(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<DusunId>,
) -> ApiResult<Json<MessageResponse>> {
    admin.require_delete()?;

    DusunRepository::new((*state.db).clone())
        .delete(id)
        .await
        .map_err(map_error)?;

    info!(dusun_id = %id, admin_id = %admin.admin_id(), "Dusun deleted");
    Ok(Json(MessageResponse::new("Dusun berhasil dihapus")))
}
