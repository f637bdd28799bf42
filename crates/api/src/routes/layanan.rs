//! Letter request routes: the public form and admin processing.
//!
//! `{surat_type}` is the letter slug, e.g. `surat-kelahiran`.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use desa_core::captcha::require_human;
use desa_core::letters::{
    LetterData, LetterKind, LetterRecord, LetterStatus, LetterUpdate, LetterWorkflow, Transition,
    compose, render_pdf, today_in_jakarta,
};
use desa_db::{LetterRepository, RepositoryError};
use desa_shared::{
    AppError, FieldErrors,
    error::flatten_validation_errors,
    types::{LetterId, PageRequest, PageResponse},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::MessageResponse;
use crate::{AppState, error::ApiResult, extractors::json_rejection, middleware::AuthUser};

/// Body field carrying the CAPTCHA token.
const CAPTCHA_FIELD: &str = "captcha_token";

/// Public routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/layanan/{surat_type}", post(submit))
}

/// Admin routes.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/layanan/{surat_type}", get(list))
        .route(
            "/layanan/{surat_type}/{id}",
            get(get_one).put(update).delete(delete_one),
        )
        .route("/layanan/{surat_type}/{id}/pdf", get(download_pdf))
}

/// Filters of the admin list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Only requests in this status.
    pub status: Option<LetterStatus>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

impl ListQuery {
    fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
    }
}

fn parse_kind(slug: &str) -> Result<LetterKind, AppError> {
    slug.parse()
        .map_err(|_| AppError::NotFound(format!("Jenis surat '{slug}' tidak dikenal")))
}

fn not_found() -> AppError {
    AppError::NotFound("Permohonan surat tidak ditemukan".to_string())
}

fn map_error(error: RepositoryError) -> AppError {
    match error {
        RepositoryError::NotFound => not_found(),
        other => other.into(),
    }
}

/// Splits the CAPTCHA token off the form body.
fn take_token(body: &mut Value) -> Option<String> {
    body.as_object_mut()?
        .remove(CAPTCHA_FIELD)?
        .as_str()
        .map(str::to_string)
}

/// Decodes and validates the payload of `kind`.
///
/// A blank CAPTCHA token is reported in the same field map as payload errors.
fn parse_form(kind: LetterKind, body: Value, token: Option<&str>) -> Result<LetterData, AppError> {
    let data = LetterData::from_json(kind, body)
        .map_err(|e| AppError::BadRequest(format!("Data permohonan tidak valid: {e}")))?;

    let mut errors = match data.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => flatten_validation_errors(&e),
    };
    if token.is_none_or(|t| t.trim().is_empty()) {
        errors
            .entry(CAPTCHA_FIELD.to_string())
            .or_default()
            .push("Verifikasi CAPTCHA wajib diisi".to_string());
    }

    if errors.is_empty() {
        Ok(data)
    } else {
        Err(AppError::Validation(errors))
    }
}

/// POST /layanan/{surat_type} - Citizen submission.
///
/// Validation runs first, then the CAPTCHA check, then the insert.
async fn submit(
    State(state): State<AppState>,
    Path(surat_type): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<LetterRecord>)> {
    let kind = parse_kind(&surat_type)?;
    let Json(mut body) = payload.map_err(json_rejection)?;

    let token = take_token(&mut body);
    let data = parse_form(kind, body, token.as_deref())?;

    require_human(state.captcha.as_ref(), token.as_deref()).await?;

    let record = LetterRepository::new((*state.db).clone())
        .create(&data)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /admin/layanan/{surat_type}?status=&page=&per_page=
async fn list(
    State(state): State<AppState>,
    _admin: AuthUser,
    Path(surat_type): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<PageResponse<LetterRecord>>> {
    let kind = parse_kind(&surat_type)?;
    let page = query.page_request();

    let (records, total) = LetterRepository::new((*state.db).clone())
        .list(kind, query.status, &page)
        .await?;
    Ok(Json(PageResponse::new(records, &page, total)))
}

async fn find(state: &AppState, kind: LetterKind, id: LetterId) -> ApiResult<LetterRecord> {
    Ok(LetterRepository::new((*state.db).clone())
        .find(kind, id)
        .await?
        .ok_or_else(not_found)?)
}

/// GET /admin/layanan/{surat_type}/{id}
async fn get_one(
    State(state): State<AppState>,
    _admin: AuthUser,
    Path((surat_type, id)): Path<(String, LetterId)>,
) -> ApiResult<Json<LetterRecord>> {
    let kind = parse_kind(&surat_type)?;
    Ok(Json(find(&state, kind, id).await?))
}

/// PUT /admin/layanan/{surat_type}/{id} - Partial update of status and number.
async fn update(
    State(state): State<AppState>,
    admin: AuthUser,
    Path((surat_type, id)): Path<(String, LetterId)>,
    payload: Result<Json<LetterUpdate>, JsonRejection>,
) -> ApiResult<Json<LetterRecord>> {
    let kind = parse_kind(&surat_type)?;
    let Json(update) = payload.map_err(json_rejection)?;

    let current = find(&state, kind, id).await?;
    let change = LetterWorkflow::apply(&current, &update)?;

    let record = LetterRepository::new((*state.db).clone())
        .update(kind, id, &change)
        .await
        .map_err(map_error)?;

    if change.transition == Transition::Completed {
        info!(letter_id = %id, kind = %kind, admin_id = %admin.admin_id(), "Letter request finished");
    } else {
        info!(letter_id = %id, kind = %kind, status = %record.status, admin_id = %admin.admin_id(), "Letter request updated");
    }
    Ok(Json(record))
}

/// DELETE /admin/layanan/{surat_type}/{id}
async fn delete_one(
    State(state): State<AppState>,
    admin: AuthUser,
    Path((surat_type, id)): Path<(String, LetterId)>,
) -> ApiResult<Json<MessageResponse>> {
    let kind = parse_kind(&surat_type)?;
    admin.require_delete()?;

    LetterRepository::new((*state.db).clone())
        .delete(kind, id)
        .await
        .map_err(map_error)?;

    info!(letter_id = %id, kind = %kind, admin_id = %admin.admin_id(), "Letter request deleted");
    Ok(Json(MessageResponse::new("Permohonan berhasil dihapus")))
}

/// GET /admin/layanan/{surat_type}/{id}/pdf - 409 until a letter number is set.
async fn download_pdf(
    State(state): State<AppState>,
    _admin: AuthUser,
    Path((surat_type, id)): Path<(String, LetterId)>,
) -> ApiResult<Response> {
    let kind = parse_kind(&surat_type)?;
    let record = find(&state, kind, id).await?;

    let document = compose(&state.letterhead, &record, today_in_jakarta(Utc::now()))?;
    let filename = document.filename.clone();
    let bytes = tokio::task::spawn_blocking(move || render_pdf(&document))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    info!(letter_id = %id, kind = %kind, bytes = bytes.len(), "Letter document generated");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::routes::test_support::{
        TestApp, count_exec, count_row, letter_model, request, statement_json,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use desa_core::captcha::{CaptchaError, CaptchaVerifier};
    use desa_db::entities::letter_requests;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use uuid::Uuid;

    struct Expired;

    #[async_trait]
    impl CaptchaVerifier for Expired {
        async fn verify(&self, _token: &str) -> Result<(), CaptchaError> {
            Err(CaptchaError::Expired)
        }
    }

    fn form_with_token() -> Value {
        let mut body = statement_json();
        body["captcha_token"] = json!("token-dari-widget");
        body
    }

    #[test]
    fn test_take_token_removes_field() {
        let mut body = form_with_token();
        assert_eq!(take_token(&mut body).as_deref(), Some("token-dari-widget"));
        assert!(body.get("captcha_token").is_none());
    }

    #[tokio::test]
    async fn test_submit_creates_pending_request() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![letter_model(id, None)]])
            .into_connection();
        let app = TestApp::new(db);

        let (status, body) = app
            .post("/api/layanan/surat-keterangan", None, form_with_token())
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["kind"], "surat-keterangan");
        assert!(body["nomor_surat"].is_null());
    }

    #[tokio::test]
    async fn test_missing_token_and_bad_nik_share_one_error_map() {
        let app = TestApp::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let mut body = statement_json();
        body["nik"] = json!("123");

        let (status, body) = app.post("/api/layanan/surat-keterangan", None, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["nik"].is_array());
        assert!(body["errors"]["captcha_token"].is_array());
    }

    #[tokio::test]
    async fn test_oversized_field_is_rejected_before_storage() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = TestApp::new(db);
        let mut body = form_with_token();
        body["keperluan"] = json!("Persyaratan administrasi ".repeat(400));

        let (status, body) = app.post("/api/layanan/surat-keterangan", None, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["keperluan"].is_array());
    }

    #[tokio::test]
    async fn test_expired_captcha_is_forbidden_and_nothing_is_stored() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = TestApp::with_captcha(db, Arc::new(Expired));

        let (status, body) = app
            .post("/api/layanan/surat-keterangan", None, form_with_token())
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "forbidden");
        assert!(app.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_letter_kind_is_404() {
        let app = TestApp::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let (status, _) = app
            .post("/api/layanan/surat-cerai", None, form_with_token())
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_list_filters_by_status() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(1)]])
            .append_query_results([vec![letter_model(Uuid::now_v7(), Some("474/1/2026"))]])
            .into_connection();
        let app = TestApp::new(db);
        let token = app.token("operator");

        let (status, body) = app
            .get(
                "/api/admin/layanan/surat-keterangan?status=finish&page=1",
                Some(&token),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["status"], "finish");
    }

    #[tokio::test]
    async fn test_update_sets_number_and_finishes() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![letter_model(id, None)],
                vec![letter_model(id, None)],
                vec![letter_model(id, Some("474/12/2026"))],
            ])
            .into_connection();
        let app = TestApp::new(db);
        let token = app.token("operator");

        let (status, body) = app
            .put(
                &format!("/api/admin/layanan/surat-keterangan/{id}"),
                Some(&token),
                json!({"status": "finish", "nomor_surat": " 474/12/2026 "}),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["nomor_surat"], "474/12/2026");

        let log = format!("{:?}", app.into_transaction_log());
        assert!(log.contains("474/12/2026"));
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![letter_model(id, None)]])
            .into_connection();
        let app = TestApp::new(db);
        let token = app.token("admin");

        let (status, _) = app
            .put(
                &format!("/api/admin/layanan/surat-keterangan/{id}"),
                Some(&token),
                json!({}),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pdf_without_number_is_conflict() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![letter_model(id, None)]])
            .into_connection();
        let app = TestApp::new(db);
        let token = app.token("admin");

        let (status, body) = app
            .get(
                &format!("/api/admin/layanan/surat-keterangan/{id}/pdf"),
                Some(&token),
            )
            .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");
    }

    #[tokio::test]
    async fn test_pdf_download_is_attachment() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![letter_model(id, Some("474/12/2026"))]])
            .into_connection();
        let app = TestApp::new(db);
        let token = app.token("admin");

        let response = app
            .send(request(
                "GET",
                &format!("/api/admin/layanan/surat-keterangan/{id}/pdf"),
                Some(&token),
                Body::empty(),
            ))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("surat-keterangan-Rina-Wulandari.pdf"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_lookup_of_other_kind_is_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<letter_requests::Model>::new()])
            .into_connection();
        let app = TestApp::new(db);
        let token = app.token("admin");

        let (status, _) = app
            .get(
                &format!("/api/admin/layanan/surat-kematian/{}", Uuid::now_v7()),
                Some(&token),
            )
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_operator_cannot_delete_and_admin_can() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([count_exec(1)])
            .into_connection();
        let app = TestApp::new(db);
        let uri = format!("/api/admin/layanan/surat-keterangan/{id}");

        let (status, _) = app.delete(&uri, Some(&app.token("operator"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app.delete(&uri, Some(&app.token("admin"))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let app = TestApp::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let (status, body) = app
            .get("/api/admin/layanan/surat-keterangan", Some(&app.expired_token()))
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "token_expired");
    }
}
