//! CAPTCHA verification for anonymous submissions.
//!
//! Handlers depend on the [`CaptchaVerifier`] port. [`HttpCaptchaVerifier`]
//! talks to a reCAPTCHA-compatible site-verify endpoint; [`AllowAll`] is
//! used when verification is switched off.

use std::time::Duration;

use async_trait::async_trait;
use desa_shared::{AppError, CaptchaConfig};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Provider error code for an expired or replayed token.
pub const EXPIRED_CODE: &str = "timeout-or-duplicate";

/// Verification failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptchaError {
    /// No token in the request.
    #[error("captcha token missing")]
    Missing,

    /// Token expired or was already used; the client must verify again.
    #[error("captcha token expired")]
    Expired,

    /// Provider rejected the token.
    #[error("captcha rejected: {0:?}")]
    Rejected(Vec<String>),

    /// Provider could not be reached or answered garbage.
    #[error("captcha service unavailable: {0}")]
    Unavailable(String),
}

impl From<CaptchaError> for AppError {
    fn from(error: CaptchaError) -> Self {
        match error {
            CaptchaError::Missing => Self::field("captcha_token", "Verifikasi CAPTCHA wajib diisi"),
            CaptchaError::Expired => Self::Forbidden(
                "Verifikasi CAPTCHA kedaluwarsa, silakan verifikasi ulang".to_string(),
            ),
            CaptchaError::Rejected(_) => Self::Forbidden("Verifikasi CAPTCHA gagal".to_string()),
            CaptchaError::Unavailable(e) => Self::ExternalService(e),
        }
    }
}

/// Checks a CAPTCHA token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// Succeeds when the token proves a human submitted the form.
    async fn verify(&self, token: &str) -> Result<(), CaptchaError>;
}

/// Verifies `token` unless it is blank, logging rejections.
pub async fn require_human(
    verifier: &dyn CaptchaVerifier,
    token: Option<&str>,
) -> Result<(), CaptchaError> {
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(CaptchaError::Missing)?;

    verifier.verify(token).await.inspect_err(|e| {
        warn!(error = %e, "captcha verification failed");
    })
}

/// Body of a site-verify response.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteVerifyResponse {
    /// Whether the token is valid.
    pub success: bool,
    /// Failure codes.
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

impl SiteVerifyResponse {
    /// Maps the provider answer to a verification result.
    pub fn into_result(self) -> Result<(), CaptchaError> {
        if self.success {
            Ok(())
        } else if self.error_codes.iter().any(|c| c == EXPIRED_CODE) {
            Err(CaptchaError::Expired)
        } else {
            Err(CaptchaError::Rejected(self.error_codes))
        }
    }
}

/// Site-verify client.
#[derive(Debug, Clone)]
pub struct HttpCaptchaVerifier {
    client: reqwest::Client,
    verify_url: String,
    secret: String,
}

impl HttpCaptchaVerifier {
    /// Builds a client with the configured timeout.
    pub fn new(config: &CaptchaConfig) -> Result<Self, CaptchaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CaptchaError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            verify_url: config.verify_url.clone(),
            secret: config.secret.clone(),
        })
    }
}

#[async_trait]
impl CaptchaVerifier for HttpCaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<(), CaptchaError> {
        let response = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await
            .map_err(|e| CaptchaError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| CaptchaError::Unavailable(e.to_string()))?;

        let body: SiteVerifyResponse = response
            .json()
            .await
            .map_err(|e| CaptchaError::Unavailable(e.to_string()))?;

        debug!(success = body.success, codes = ?body.error_codes, "captcha site-verify answered");
        body.into_result()
    }
}

/// Accepts every token. For development only.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl CaptchaVerifier for AllowAll {
    async fn verify(&self, _token: &str) -> Result<(), CaptchaError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn response(success: bool, codes: &[&str]) -> SiteVerifyResponse {
        SiteVerifyResponse {
            success,
            error_codes: codes.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    #[test]
    fn test_site_verify_mapping() {
        assert_eq!(response(true, &[]).into_result(), Ok(()));
        assert_eq!(
            response(false, &["timeout-or-duplicate"]).into_result(),
            Err(CaptchaError::Expired)
        );
        assert_eq!(
            response(false, &["invalid-input-response"]).into_result(),
            Err(CaptchaError::Rejected(vec!["invalid-input-response".into()]))
        );
    }

    #[test]
    fn test_site_verify_json() {
        let body: SiteVerifyResponse = serde_json::from_str(
            r#"{"success": false, "error-codes": ["timeout-or-duplicate"]}"#,
        )
        .unwrap();
        assert_eq!(body.into_result(), Err(CaptchaError::Expired));

        let body: SiteVerifyResponse =
            serde_json::from_str(r#"{"success": true, "hostname": "desa.id"}"#).unwrap();
        assert!(body.error_codes.is_empty());
    }

    #[tokio::test]
    async fn test_blank_token_skips_provider() {
        let mut mock = MockCaptchaVerifier::new();
        mock.expect_verify().never();

        assert_eq!(require_human(&mock, None).await, Err(CaptchaError::Missing));
        assert_eq!(require_human(&mock, Some("  ")).await, Err(CaptchaError::Missing));
    }

    #[tokio::test]
    async fn test_token_is_trimmed_and_forwarded() {
        let mut mock = MockCaptchaVerifier::new();
        mock.expect_verify()
            .with(eq("tok-123"))
            .times(1)
            .returning(|_| Ok(()));

        assert_eq!(require_human(&mock, Some(" tok-123 ")).await, Ok(()));
    }

    #[tokio::test]
    async fn test_provider_rejection_is_returned() {
        let mut mock = MockCaptchaVerifier::new();
        mock.expect_verify()
            .returning(|_| Err(CaptchaError::Expired));

        assert_eq!(require_human(&mock, Some("old")).await, Err(CaptchaError::Expired));
    }

    #[test]
    fn test_app_error_mapping() {
        assert_eq!(AppError::from(CaptchaError::Expired).status_code(), 403);
        assert_eq!(AppError::from(CaptchaError::Missing).status_code(), 400);
        assert_eq!(
            AppError::from(CaptchaError::Unavailable("timeout".into())).status_code(),
            502
        );
    }

    #[tokio::test]
    async fn test_allow_all() {
        assert!(AllowAll.verify("anything").await.is_ok());
    }
}
