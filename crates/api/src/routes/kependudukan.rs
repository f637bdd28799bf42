//! Population statistics routes.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use desa_core::charts::{ChartSeries, demographic_charts};
use desa_core::demography::{DemographicOverview, DemographicRecord, DemographicSummary, Demographics};
use desa_db::{DemographicRepository, RepositoryError};
use desa_shared::AppError;
use serde::Serialize;
use tracing::info;

use super::MessageResponse;
use crate::{AppState, error::ApiResult, extractors::json_rejection, middleware::AuthUser};

/// Public routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/kependudukan", get(latest))
        .route("/kependudukan/tahun", get(list_years))
        .route("/kependudukan/{tahun}", get(by_year))
}

/// Admin routes.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/kependudukan", get(list_overview).post(create))
        .route(
            "/kependudukan/{tahun}",
            get(get_one).put(update).delete(delete_one),
        )
}

/// Public view of a year.
#[derive(Debug, Serialize)]
pub struct DemographicView {
    /// Stored snapshot.
    #[serde(flatten)]
    pub record: DemographicRecord,
    /// Totals over all hamlets.
    pub ringkasan: DemographicSummary,
    /// Chart-ready series.
    pub charts: Vec<ChartSeries>,
}

impl From<DemographicRecord> for DemographicView {
    fn from(record: DemographicRecord) -> Self {
        Self {
            ringkasan: record.data.summary(),
            charts: demographic_charts(&record.data),
            record,
        }
    }
}

fn not_found(tahun: Option<i32>) -> AppError {
    AppError::NotFound(match tahun {
        Some(tahun) => format!("Data kependudukan tahun {tahun} tidak ditemukan"),
        None => "Data kependudukan belum tersedia".to_string(),
    })
}

fn map_write_error(path_year: Option<i32>, body_year: i32) -> impl FnOnce(RepositoryError) -> AppError {
    move |error| match error {
        RepositoryError::NotFound => not_found(path_year),
        RepositoryError::Duplicate(_) => {
            AppError::Conflict(format!("Data kependudukan tahun {body_year} sudah ada"))
        }
        other => other.into(),
    }
}

/// Parses the body and runs field rules plus the per-hamlet total check.
fn checked(payload: Result<Json<Demographics>, JsonRejection>) -> ApiResult<Demographics> {
    let Json(data) = payload.map_err(json_rejection)?;
    data.check().map_err(AppError::Validation)?;
    Ok(data)
}

/// GET /kependudukan - Newest year.
async fn latest(State(state): State<AppState>) -> ApiResult<Json<DemographicView>> {
    let record = DemographicRepository::new((*state.db).clone())
        .latest()
        .await?
        .ok_or_else(|| not_found(None))?;
    Ok(Json(record.into()))
}

/// GET /kependudukan/tahun
async fn list_years(State(state): State<AppState>) -> ApiResult<Json<Vec<i32>>> {
    Ok(Json(
        DemographicRepository::new((*state.db).clone())
            .list_years()
            .await?,
    ))
}

/// GET /kependudukan/{tahun}
async fn by_year(
    State(state): State<AppState>,
    Path(tahun): Path<i32>,
) -> ApiResult<Json<DemographicView>> {
    let record = DemographicRepository::new((*state.db).clone())
        .find_by_tahun(tahun)
        .await?
        .ok_or_else(|| not_found(Some(tahun)))?;
    Ok(Json(record.into()))
}

/// GET /admin/kependudukan
async fn list_overview(
    State(state): State<AppState>,
    _admin: AuthUser,
) -> ApiResult<Json<Vec<DemographicOverview>>> {
    Ok(Json(
        DemographicRepository::new((*state.db).clone())
            .list_overview()
            .await?,
    ))
}

/// GET /admin/kependudukan/{tahun}
async fn get_one(
    State(state): State<AppState>,
    _admin: AuthUser,
    Path(tahun): Path<i32>,
) -> ApiResult<Json<DemographicRecord>> {
    let record = DemographicRepository::new((*state.db).clone())
        .find_by_tahun(tahun)
        .await?
        .ok_or_else(|| not_found(Some(tahun)))?;
    Ok(Json(record))
}

/// POST /admin/kependudukan
async fn create(
    State(state): State<AppState>,
    admin: AuthUser,
    payload: Result<Json<Demographics>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DemographicRecord>)> {
    let data = checked(payload)?;

    let record = DemographicRepository::new((*state.db).clone())
        .create(&data)
        .await
        .map_err(map_write_error(None, data.tahun))?;

    info!(tahun = record.data.tahun, admin_id = %admin.admin_id(), "Demographics created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /admin/kependudukan/{tahun}
async fn update(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(tahun): Path<i32>,
    payload: Result<Json<Demographics>, JsonRejection>,
) -> ApiResult<Json<DemographicRecord>> {
    let data = checked(payload)?;

    let record = DemographicRepository::new((*state.db).clone())
        .update(tahun, &data)
        .await
        .map_err(map_write_error(Some(tahun), data.tahun))?;

    info!(tahun = record.data.tahun, admin_id = %admin.admin_id(), "Demographics updated");
    Ok(Json(record))
}

/// DELETE /admin/kependudukan/{tahun}
async fn delete_one(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(tahun): Path<i32>,
) -> ApiResult<Json<MessageResponse>> {
    admin.require_delete()?;

    DemographicRepository::new((*state.db).clone())
        .delete(tahun)
        .await
        .map_err(map_write_error(Some(tahun), tahun))?;

    info!(tahun, admin_id = %admin.admin_id(), "Demographics deleted");
    Ok(Json(MessageResponse::new(format!(
        "Data kependudukan tahun {tahun} berhasil dihapus"
    ))))
}
