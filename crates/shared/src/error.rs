//! Application-wide error types.

use std::collections::BTreeMap;

use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Field-keyed validation messages, e.g. `pendapatan.rincian[0].uraian`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied (also used for a rejected CAPTCHA).
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body could not be parsed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body parsed but failed field validation.
    #[error("Validation error: {} field(s) invalid", .0.len())]
    Validation(FieldErrors),

    /// Conflict (duplicate year, letter not ready for download, ...).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// External service error.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::BadRequest(_) | Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::ExternalService(_) => 502,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Validation(_) => "validation_error",
            Self::Conflict(_) => "conflict",
            Self::Database(_) | Self::Internal(_) => "internal_error",
            Self::ExternalService(_) => "external_service_error",
        }
    }

    /// Message safe to show to the caller. Server-side details stay in logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::BadRequest(m)
            | Self::Conflict(m) => m.clone(),
            Self::Validation(_) => "Data yang dikirim tidak valid".to_string(),
            Self::ExternalService(_) => "Layanan eksternal tidak dapat dihubungi".to_string(),
            Self::Database(_) | Self::Internal(_) => "Terjadi kesalahan pada server".to_string(),
        }
    }

    /// Builds a single-field validation error.
    #[must_use]
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        Self::Validation(errors)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(flatten_validation_errors(&errors))
    }
}

/// Flattens nested `validator` errors into `path -> messages`.
///
/// Struct nesting is joined with `.`, list items use `[index]`.
#[must_use]
pub fn flatten_validation_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect(errors, "", &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages = out.entry(path).or_default();
                for error in list {
                    let message = error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string);
                    messages.push(message);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use validator::Validate;

    #[rstest]
    #[case(AppError::Unauthorized(String::new()), 401, "unauthorized")]
    #[case(AppError::Forbidden(String::new()), 403, "forbidden")]
    #[case(AppError::NotFound(String::new()), 404, "not_found")]
    #[case(AppError::BadRequest(String::new()), 400, "bad_request")]
    #[case(AppError::Validation(FieldErrors::new()), 400, "validation_error")]
    #[case(AppError::Conflict(String::new()), 409, "conflict")]
    #[case(AppError::Database(String::new()), 500, "internal_error")]
    #[case(AppError::ExternalService(String::new()), 502, "external_service_error")]
    #[case(AppError::Internal(String::new()), 500, "internal_error")]
    fn test_status_and_code(#[case] error: AppError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(error.status_code(), status);
        assert_eq!(error.error_code(), code);
    }

    #[test]
    fn test_internal_details_are_not_public() {
        let error = AppError::Database("relation \"apbdes\" does not exist".into());
        assert!(!error.public_message().contains("apbdes"));
    }

    #[derive(Validate)]
    struct Line {
        #[validate(length(min = 1, message = "wajib diisi"))]
        uraian: String,
    }

    #[derive(Validate)]
    struct Section {
        #[validate(nested)]
        rincian: Vec<Line>,
    }

    #[derive(Validate)]
    struct Form {
        #[validate(range(min = 2000, max = 2100))]
        tahun: i32,
        #[validate(nested)]
        pendapatan: Section,
    }

    #[test]
    fn test_flatten_nested_paths() {
        let form = Form {
            tahun: 1999,
            pendapatan: Section {
                rincian: vec![
                    Line {
                        uraian: "Dana Desa".into(),
                    },
                    Line {
                        uraian: String::new(),
                    },
                ],
            },
        };

        let errors = form.validate().expect_err("form is invalid");
        let flat = flatten_validation_errors(&errors);

        assert_eq!(flat.len(), 2);
        assert_eq!(flat["tahun"], vec!["range".to_string()]);
        assert_eq!(
            flat["pendapatan.rincian[1].uraian"],
            vec!["wajib diisi".to_string()]
        );
    }

    #[test]
    fn test_field_helper() {
        let AppError::Validation(map) = AppError::field("nomor_surat", "kosong") else {
            panic!("expected validation error");
        };
        assert_eq!(map["nomor_surat"], vec!["kosong".to_string()]);
    }
}
