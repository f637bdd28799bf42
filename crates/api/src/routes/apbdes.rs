//! APBDes routes: public year view and admin management.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use desa_core::apbdes::{BudgetOverview, BudgetPlan, BudgetRecord, SurplusKind};
use desa_core::charts::{ChartSeries, budget_charts};
use desa_db::{BudgetRepository, RepositoryError};
use desa_shared::AppError;
use serde::Serialize;
use tracing::info;

use super::MessageResponse;
use crate::{AppState, error::ApiResult, extractors::ValidatedJson, middleware::AuthUser};

/// Public routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/apbdes", get(latest))
        .route("/apbdes/tahun", get(list_years))
        .route("/apbdes/{tahun}", get(by_year))
}

/// Admin routes (auth middleware is applied by the caller).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/apbdes", get(list_overview).post(create))
        .route(
            "/apbdes/{tahun}",
            get(get_one).put(update).delete(delete_one),
        )
}

/// Public view of a year: the document, its surplus class and chart series.
#[derive(Debug, Serialize)]
pub struct BudgetView {
    /// Stored document.
    #[serde(flatten)]
    pub record: BudgetRecord,
    /// Whether the overall figure is a surplus or a deficit.
    pub surplus_kind: SurplusKind,
    /// Chart-ready series.
    pub charts: Vec<ChartSeries>,
}

impl From<BudgetRecord> for BudgetView {
    fn from(record: BudgetRecord) -> Self {
        Self {
            surplus_kind: record.plan.surplus_kind(),
            charts: budget_charts(&record.plan),
            record,
        }
    }
}

fn not_found(tahun: Option<i32>) -> AppError {
    AppError::NotFound(match tahun {
        Some(tahun) => format!("APBDes tahun {tahun} tidak ditemukan"),
        None => "Data APBDes belum tersedia".to_string(),
    })
}

fn year_taken(tahun: i32) -> impl FnOnce(RepositoryError) -> AppError {
    move |error| match error {
        RepositoryError::Duplicate(_) => {
            AppError::Conflict(format!("APBDes tahun {tahun} sudah ada"))
        }
        other => other.into(),
    }
}

/// GET /apbdes - Newest year.
async fn latest(State(state): State<AppState>) -> ApiResult<Json<BudgetView>> {
    let record = BudgetRepository::new((*state.db).clone())
        .latest()
        .await?
        .ok_or_else(|| not_found(None))?;
    Ok(Json(record.into()))
}

/// GET /apbdes/tahun - Years with a document, newest first.
async fn list_years(State(state): State<AppState>) -> ApiResult<Json<Vec<i32>>> {
    let years = BudgetRepository::new((*state.db).clone())
        .list_years()
        .await?;
    Ok(Json(years))
}

/// GET /apbdes/{tahun}
async fn by_year(
    State(state): State<AppState>,
    Path(tahun): Path<i32>,
) -> ApiResult<Json<BudgetView>> {
    let record = BudgetRepository::new((*state.db).clone())
        .find_by_tahun(tahun)
        .await?
        .ok_or_else(|| not_found(Some(tahun)))?;
    Ok(Json(record.into()))
}

/// GET /admin/apbdes - Headline figures per year.
async fn list_overview(
    State(state): State<AppState>,
    _admin: AuthUser,
) -> ApiResult<Json<Vec<BudgetOverview>>> {
    let rows = BudgetRepository::new((*state.db).clone())
        .list_overview()
        .await?;
    Ok(Json(rows))
}

/// GET /admin/apbdes/{tahun}
async fn get_one(
    State(state): State<AppState>,
    _admin: AuthUser,
    Path(tahun): Path<i32>,
) -> ApiResult<Json<BudgetRecord>> {
    let record = BudgetRepository::new((*state.db).clone())
        .find_by_tahun(tahun)
        .await?
        .ok_or_else(|| not_found(Some(tahun)))?;
    Ok(Json(record))
}

/// POST /admin/apbdes - Totals are re-derived before storing.
async fn create(
    State(state): State<AppState>,
    admin: AuthUser,
    ValidatedJson(mut plan): ValidatedJson<BudgetPlan>,
) -> ApiResult<(StatusCode, Json<BudgetRecord>)> {
    plan.recompute()?;

    let record = BudgetRepository::new((*state.db).clone())
        .create(&plan)
        .await
        .map_err(year_taken(plan.tahun))?;

    info!(
        tahun = record.plan.tahun,
        surplus = record.plan.ringkasan.surplus,
        admin_id = %admin.admin_id(),
        "APBDes created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /admin/apbdes/{tahun} - Full replacement; totals are re-derived.
async fn update(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(tahun): Path<i32>,
    ValidatedJson(mut plan): ValidatedJson<BudgetPlan>,
) -> ApiResult<Json<BudgetRecord>> {
    plan.recompute()?;

    let record = BudgetRepository::new((*state.db).clone())
        .update(tahun, &plan)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => not_found(Some(tahun)),
            other => year_taken(plan.tahun)(other),
        })?;

    info!(
        tahun = record.plan.tahun,
        surplus = record.plan.ringkasan.surplus,
        admin_id = %admin.admin_id(),
        "APBDes updated"
    );
    Ok(Json(record))
}

/// DELETE /admin/apbdes/{tahun}
async fn delete_one(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(tahun): Path<i32>,
) -> ApiResult<Json<MessageResponse>> {
    admin.require_delete()?;

    BudgetRepository::new((*state.db).clone())
        .delete(tahun)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => not_found(Some(tahun)),
            other => other.into(),
        })?;

    info!(tahun, admin_id = %admin.admin_id(), "APBDes deleted");
    Ok(Json(MessageResponse::new(format!(
        "APBDes tahun {tahun} berhasil dihapus"
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{TestApp, apbdes_model, count_exec};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    #[tokio::test]
    async fn test_latest_includes_charts_and_surplus_kind() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![apbdes_model(2025)]])
            .into_connection();
        let app = TestApp::new(db);

        let (status, body) = app.get("/api/apbdes", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tahun"], 2025);
        assert_eq!(body["surplus_kind"], "surplus");
        assert_eq!(body["charts"][0]["key"], "pendapatan");
    }

    #[tokio::test]
    async fn test_empty_database_is_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<desa_db::entities::apbdes::Model>::new()])
            .into_connection();
        let app = TestApp::new(db);

        let (status, body) = app.get("/api/apbdes", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_admin_routes_require_token() {
        let app = TestApp::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let (status, body) = app.get("/api/admin/apbdes", None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "missing_token");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_year_with_field_map() {
        let app = TestApp::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let token = app.token("admin");

        let (status, body) = app
            .post(
                "/api/admin/apbdes",
                Some(&token),
                json!({"tahun": 1999, "pendapatan": {"rincian": [{"uraian": "", "jumlah": 5}]}}),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["tahun"].is_array());
        assert!(body["errors"]["pendapatan.rincian[0].uraian"].is_array());
    }

    #[tokio::test]
    async fn test_create_recomputes_before_storing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![apbdes_model(2026)]])
            .into_connection();
        let app = TestApp::new(db);
        let token = app.token("operator");

        let (status, _) = app
            .post(
                "/api/admin/apbdes",
                Some(&token),
                json!({
                    "tahun": 2026,
                    "ringkasan": {"pendapatan": 1, "belanja": 1, "pembiayaan_penerimaan": 0,
                                  "pembiayaan_pengeluaran": 0, "surplus": 987_654_321},
                    "pendapatan": {"rincian": [
                        {"uraian": "Dana Desa", "sub_rincian": [
                            {"uraian": "Tahap I", "jumlah": 100000},
                            {"uraian": "Tahap II", "jumlah": 75000}
                        ]}
                    ]},
                    "belanja": {"rincian": [{"uraian": "Pembangunan", "jumlah": 90000}]}
                }),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);

        let log = format!("{:?}", app.into_transaction_log());
        assert!(log.contains("175000"));
        assert!(log.contains("85000"));
        assert!(!log.contains("987654321"));
    }

    #[tokio::test]
    async fn test_operator_cannot_delete() {
        let app = TestApp::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let token = app.token("operator");

        let (status, _) = app.delete("/api/admin/apbdes/2025", Some(&token)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_delete_unknown_year_is_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([count_exec(0)])
            .into_connection();
        let app = TestApp::new(db);
        let token = app.token("admin");

        let (status, body) = app.delete("/api/admin/apbdes/2030", Some(&token)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "APBDes tahun 2030 tidak ditemukan");
    }
}
