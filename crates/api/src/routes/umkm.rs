//! UMKM listing routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use desa_core::umkm::{UmkmInput, UmkmListing};
use desa_db::{RepositoryError, UmkmRepository};
use desa_shared::{
    AppError,
    types::{PageRequest, PageResponse, UmkmId},
};
use serde::Serialize;
use tracing::info;

use super::MessageResponse;
use crate::{AppState, error::ApiResult, extractors::ValidatedJson, middleware::AuthUser};

/// Public routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/umkm", get(list))
        .route("/umkm/{id}", get(get_one))
}

/// Admin routes.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/umkm", get(admin_list).post(create))
        .route(
            "/umkm/{id}",
            get(admin_get).put(update).delete(delete_one),
        )
}

/// Listing with its chat link.
#[derive(Debug, Serialize)]
pub struct UmkmView {
    /// Stored listing.
    #[serde(flatten)]
    pub listing: UmkmListing,
    /// `https://wa.me/...` link when the number is usable.
    pub whatsapp_link: Option<String>,
}

impl From<UmkmListing> for UmkmView {
    fn from(listing: UmkmListing) -> Self {
        Self {
            whatsapp_link: listing.whatsapp_link(),
            listing,
        }
    }
}

fn not_found() -> AppError {
    AppError::NotFound("UMKM tidak ditemukan".to_string())
}

fn map_error(error: RepositoryError) -> AppError {
    match error {
        RepositoryError::NotFound => not_found(),
        other => other.into(),
    }
}

async fn page_of(state: &AppState, page: &PageRequest) -> ApiResult<PageResponse<UmkmView>> {
    let (listings, total) = UmkmRepository::new((*state.db).clone())
        .list(page)
        .await?;
    Ok(PageResponse::new(listings, page, total).map(UmkmView::from))
}

async fn find(state: &AppState, id: UmkmId) -> ApiResult<UmkmView> {
    let listing = UmkmRepository::new((*state.db).clone())
        .find(id)
        .await?
        .ok_or_else(not_found)?;
    Ok(listing.into())
}

/// GET /umkm?page=&per_page=
async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> ApiResult<Json<PageResponse<UmkmView>>> {
    Ok(Json(page_of(&state, &page).await?))
}

/// GET /umkm/{id}
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<UmkmId>,
) -> ApiResult<Json<UmkmView>> {
    Ok(Json(find(&state, id).await?))
}

/// GET /admin/umkm
async fn admin_list(
    State(state): State<AppState>,
    _admin: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<Json<PageResponse<UmkmView>>> {
    Ok(Json(page_of(&state, &page).await?))
}

/// GET /admin/umkm/{id}
async fn admin_get(
    State(state): State<AppState>,
    _admin: AuthUser,
    Path(id): Path<UmkmId>,
) -> ApiResult<Json<UmkmView>> {
    Ok(Json(find(&state, id).await?))
}

/// POST /admin/umkm
async fn create(
    State(state): State<AppState>,
    admin: AuthUser,
    ValidatedJson(input): ValidatedJson<UmkmInput>,
) -> ApiResult<(StatusCode, Json<UmkmView>)> {
    let listing = UmkmRepository::new((*state.db).clone())
        .create(&input)
        .await?;

    info!(umkm_id = %listing.id, admin_id = %admin.admin_id(), "UMKM created");
    Ok((StatusCode::CREATED, Json(listing.into())))
}

/// PUT /admin/umkm/{id}
async fn update(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<UmkmId>,
    ValidatedJson(input): ValidatedJson<UmkmInput>,
) -> ApiResult<Json<UmkmView>> {
    let listing = UmkmRepository::new((*state.db).clone())
        .update(id, &input)
        .await
        .map_err(map_error)?;

    info!(umkm_id = %id, admin_id = %admin.admin_id(), "UMKM updated");
    Ok(Json(listing.into()))
}

/// DELETE /admin/umkm/{id}
async fn delete_one(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<UmkmId>,
) -> ApiResult<Json<MessageResponse>> {
    admin.require_delete()?;

    UmkmRepository::new((*state.db).clone())
        .delete(id)
        .await
        .map_err(map_error)?;

    info!(umkm_id = %id, admin_id = %admin.admin_id(), "UMKM deleted");
    Ok(Json(MessageResponse::new("UMKM berhasil dihapus")))
}
