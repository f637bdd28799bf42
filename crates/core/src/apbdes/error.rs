//! Budget error types.

use desa_shared::AppError;
use thiserror::Error;

use super::editor::EntryKey;

/// Errors from amount parsing and total derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    /// Input carried a fractional part; only whole Rupiah are accepted.
    #[error("amount '{0}' has a fractional part")]
    FractionalAmount(String),

    /// Input was negative.
    #[error("amount '{0}' is negative")]
    NegativeAmount(String),

    /// A sum left the `i64` range.
    #[error("amount overflow")]
    Overflow,
}

impl AggregationError {
    /// Message shown next to the offending field.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::FractionalAmount(_) => "Jumlah harus bilangan bulat Rupiah",
            Self::NegativeAmount(_) => "Jumlah tidak boleh negatif",
            Self::Overflow => "Jumlah terlalu besar",
        }
    }
}

impl From<AggregationError> for AppError {
    fn from(error: AggregationError) -> Self {
        Self::BadRequest(error.user_message().to_string())
    }
}

/// Errors from structural edits of a line-item list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// Removal would leave fewer entries than allowed.
    #[error("at least {min} entry must remain")]
    MinimumEntries {
        /// Minimum entry count.
        min: usize,
    },

    /// No entry with this key.
    #[error("unknown entry {0}")]
    UnknownEntry(EntryKey),

    /// Index beyond the end of the list.
    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current length.
        len: usize,
    },

    /// Totals could not be derived.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}
