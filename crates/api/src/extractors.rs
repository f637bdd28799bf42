//! Request extractors.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use desa_shared::AppError;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// JSON body that has passed its `validator` rules.
///
/// A body that does not parse is a 400 `bad_request`; one that parses but
/// breaks a rule is a 400 `validation_error` with the field map.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Maps a body parse failure to a 400 with the parser's explanation.
pub fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError(AppError::BadRequest(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Input {
        #[validate(range(min = 2000, max = 2100))]
        tahun: i32,
    }

    async fn handler(ValidatedJson(input): ValidatedJson<Input>) -> String {
        input.tahun.to_string()
    }

    async fn status_for(body: &'static str) -> StatusCode {
        Router::new()
            .route("/", post(handler))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        assert_eq!(status_for(r#"{"tahun": 2026}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rule_violation_is_400() {
        assert_eq!(status_for(r#"{"tahun": 1999}"#).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fractional_number_is_400() {
        assert_eq!(status_for(r#"{"tahun": 2026.5}"#).await, StatusCode::BAD_REQUEST);
    }
}
