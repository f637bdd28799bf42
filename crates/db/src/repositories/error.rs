//! Repository error type.

use desa_shared::AppError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors returned by repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row matched.
    #[error("record not found")]
    NotFound,

    /// A unique key is already taken.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// A stored JSON document no longer matches its domain type.
    #[error("stored document is corrupt: {0}")]
    Corrupt(String),

    /// Any other database failure.
    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for RepositoryError {
    fn from(error: DbErr) -> Self {
        match error.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::Duplicate(detail),
            _ => Self::Database(error),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(error: serde_json::Error) -> Self {
        Self::Corrupt(error.to_string())
    }
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => Self::NotFound("Data tidak ditemukan".to_string()),
            RepositoryError::Duplicate(_) => Self::Conflict("Data sudah ada".to_string()),
            RepositoryError::Corrupt(e) => Self::Internal(e),
            RepositoryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_mapping() {
        assert_eq!(AppError::from(RepositoryError::NotFound).status_code(), 404);
        assert_eq!(
            AppError::from(RepositoryError::Duplicate("tahun".into())).status_code(),
            409
        );
        assert_eq!(
            AppError::from(RepositoryError::Database(DbErr::Custom("boom".into()))).status_code(),
            500
        );
    }

    #[test]
    fn test_plain_db_error_is_not_duplicate() {
        let error = RepositoryError::from(DbErr::Custom("connection reset".into()));
        assert!(matches!(error, RepositoryError::Database(_)));
    }
}
