//! Turns [`AppError`] into JSON responses.
//!
//! Body shape: `{"error": code, "message": text}`, plus `"errors"` with the
//! field map for validation failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use desa_shared::AppError;
use serde_json::json;
use tracing::error;

/// Handler error. Anything convertible into [`AppError`] converts into this.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(error: E) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.0;
        let status =
            StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %error, "Request failed");
        }

        let body = match &error {
            AppError::Validation(fields) => json!({
                "error": error.error_code(),
                "message": error.public_message(),
                "errors": fields,
            }),
            _ => json!({
                "error": error.error_code(),
                "message": error.public_message(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Handler result.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use desa_shared::FieldErrors;
    use http_body_util::BodyExt;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_body_has_field_map() {
        let mut fields = FieldErrors::new();
        fields.insert("dusun[0].total".into(), vec!["tidak konsisten".into()]);

        let response = ApiError(AppError::Validation(fields)).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["errors"]["dusun[0].total"][0], "tidak konsisten");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = ApiError(AppError::Database("password authentication failed".into()))
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body["message"], "Terjadi kesalahan pada server");
        assert!(body.get("errors").is_none());
    }
}
