//! Letter error types.

use desa_shared::AppError;
use thiserror::Error;

/// Errors from admin updates of a letter request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Neither status nor letter number was supplied.
    #[error("update has no fields")]
    EmptyUpdate,

    /// Letter number longer than the column allows.
    #[error("letter number longer than {max} characters")]
    NumberTooLong {
        /// Maximum length.
        max: usize,
    },
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::EmptyUpdate | Self::NumberTooLong { .. } => 400,
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(error: WorkflowError) -> Self {
        match error {
            WorkflowError::EmptyUpdate => {
                Self::BadRequest("Tidak ada perubahan yang dikirim".to_string())
            }
            WorkflowError::NumberTooLong { max } => Self::field(
                "nomor_surat",
                format!("Nomor surat maksimal {max} karakter"),
            ),
        }
    }
}

/// Errors from generating a letter document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The request has no letter number yet.
    #[error("letter has no number")]
    MissingNumber,

    /// The PDF backend failed.
    #[error("failed to render document: {0}")]
    Render(String),
}

impl From<DocumentError> for AppError {
    fn from(error: DocumentError) -> Self {
        match error {
            DocumentError::MissingNumber => Self::Conflict(
                "Nomor surat belum diisi, dokumen belum dapat dibuat".to_string(),
            ),
            DocumentError::Render(e) => Self::Internal(e),
        }
    }
}
