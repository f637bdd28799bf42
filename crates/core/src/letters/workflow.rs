//! Admin processing of letter requests.
//!
//! Status moves `pending -> finish`. Moving back is not forbidden, but it is
//! reported as [`Transition::Reverted`] and logged. The letter number is
//! independent of status and alone decides whether a document can be made.

use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::error::WorkflowError;
use super::types::{LetterRecord, LetterStatus};

/// Longest accepted letter number.
pub const MAX_NUMBER_LEN: usize = 100;

/// Kind of status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Same status.
    Unchanged,
    /// `pending -> finish`.
    Completed,
    /// `finish -> pending`.
    Reverted,
}

/// Partial admin update. Absent fields are left alone; `nomor_surat: null`
/// clears the number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LetterUpdate {
    /// New status.
    #[serde(default)]
    pub status: Option<LetterStatus>,
    /// New letter number; `Some(None)` clears it.
    #[serde(default, deserialize_with = "present")]
    pub nomor_surat: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Outcome of applying an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterChange {
    /// Resulting status.
    pub status: LetterStatus,
    /// Resulting letter number.
    pub nomor_surat: Option<String>,
    /// What happened to the status.
    pub transition: Transition,
}

/// True for a non-blank letter number.
#[must_use]
pub fn is_downloadable(nomor_surat: Option<&str>) -> bool {
    nomor_surat.is_some_and(|n| !n.trim().is_empty())
}

/// Stateless rules for letter processing.
pub struct LetterWorkflow;

impl LetterWorkflow {
    /// Classifies a status change.
    #[must_use]
    pub const fn transition(from: LetterStatus, to: LetterStatus) -> Transition {
        match (from, to) {
            (LetterStatus::Pending, LetterStatus::Finish) => Transition::Completed,
            (LetterStatus::Finish, LetterStatus::Pending) => Transition::Reverted,
            _ => Transition::Unchanged,
        }
    }

    /// Trims a letter number; blank means unset.
    pub fn normalize_number(input: Option<&str>) -> Result<Option<String>, WorkflowError> {
        let Some(number) = input.map(str::trim).filter(|n| !n.is_empty()) else {
            return Ok(None);
        };
        if number.chars().count() > MAX_NUMBER_LEN {
            return Err(WorkflowError::NumberTooLong {
                max: MAX_NUMBER_LEN,
            });
        }
        Ok(Some(number.to_string()))
    }

    /// Applies a partial update to a record's current state.
    pub fn apply(record: &LetterRecord, update: &LetterUpdate) -> Result<LetterChange, WorkflowError> {
        if update.status.is_none() && update.nomor_surat.is_none() {
            return Err(WorkflowError::EmptyUpdate);
        }

        let status = update.status.unwrap_or(record.status);
        let transition = Self::transition(record.status, status);
        if transition == Transition::Reverted {
            warn!(
                letter_id = %record.id,
                kind = %record.kind,
                "letter request moved back from finish to pending"
            );
        }

        let nomor_surat = match &update.nomor_surat {
            Some(value) => Self::normalize_number(value.as_deref())?,
            None => record.nomor_surat.clone(),
        };

        Ok(LetterChange {
            status,
            nomor_surat,
            transition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::payload::LetterData;
    use crate::letters::payload::fixtures::statement;
    use crate::letters::types::LetterKind;
    use chrono::Utc;
    use desa_shared::types::LetterId;

    fn pending() -> LetterRecord {
        let now = Utc::now();
        LetterRecord {
            id: LetterId::new(),
            kind: LetterKind::Keterangan,
            status: LetterStatus::Pending,
            nomor_surat: None,
            nama_pemohon: "Rina Wulandari".into(),
            data: LetterData::Keterangan(statement()),
            submitted_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_transitions() {
        use LetterStatus::{Finish, Pending};
        assert_eq!(LetterWorkflow::transition(Pending, Finish), Transition::Completed);
        assert_eq!(LetterWorkflow::transition(Finish, Pending), Transition::Reverted);
        assert_eq!(LetterWorkflow::transition(Pending, Pending), Transition::Unchanged);
        assert_eq!(LetterWorkflow::transition(Finish, Finish), Transition::Unchanged);
    }

    #[test]
    fn test_new_request_is_not_downloadable() {
        assert!(!pending().is_downloadable());
    }

    #[test]
    fn test_number_makes_downloadable_regardless_of_status() {
        let mut record = pending();
        let update = LetterUpdate {
            status: None,
            nomor_surat: Some(Some(" 470/015/Ds/2026 ".into())),
        };

        let change = LetterWorkflow::apply(&record, &update).unwrap();
        assert_eq!(change.status, LetterStatus::Pending);
        assert_eq!(change.nomor_surat.as_deref(), Some("470/015/Ds/2026"));

        record.nomor_surat = change.nomor_surat;
        assert!(record.is_downloadable());
    }

    #[test]
    fn test_blank_number_is_unset() {
        let mut record = pending();
        record.nomor_surat = Some("470/001".into());
        let update = LetterUpdate {
            status: None,
            nomor_surat: Some(Some("   ".into())),
        };

        let change = LetterWorkflow::apply(&record, &update).unwrap();
        assert_eq!(change.nomor_surat, None);
    }

    #[test]
    fn test_status_only_keeps_number() {
        let mut record = pending();
        record.nomor_surat = Some("470/001".into());
        let update = LetterUpdate {
            status: Some(LetterStatus::Finish),
            nomor_surat: None,
        };

        let change = LetterWorkflow::apply(&record, &update).unwrap();
        assert_eq!(change.transition, Transition::Completed);
        assert_eq!(change.nomor_surat.as_deref(), Some("470/001"));
    }

    #[test]
    fn test_revert_is_allowed() {
        let mut record = pending();
        record.status = LetterStatus::Finish;
        let update = LetterUpdate {
            status: Some(LetterStatus::Pending),
            nomor_surat: None,
        };

        let change = LetterWorkflow::apply(&record, &update).unwrap();
        assert_eq!(change.status, LetterStatus::Pending);
        assert_eq!(change.transition, Transition::Reverted);
    }

    #[test]
    fn test_empty_update_is_rejected() {
        assert_eq!(
            LetterWorkflow::apply(&pending(), &LetterUpdate::default()),
            Err(WorkflowError::EmptyUpdate)
        );
    }

    #[test]
    fn test_update_json_distinguishes_null_and_absent() {
        let clear: LetterUpdate = serde_json::from_str(r#"{"nomor_surat": null}"#).unwrap();
        assert_eq!(clear.nomor_surat, Some(None));

        let absent: LetterUpdate = serde_json::from_str(r#"{"status": "finish"}"#).unwrap();
        assert_eq!(absent.nomor_surat, None);
        assert_eq!(absent.status, Some(LetterStatus::Finish));
    }

    #[test]
    fn test_number_length_limit() {
        let long = "9".repeat(MAX_NUMBER_LEN + 1);
        assert_eq!(
            LetterWorkflow::normalize_number(Some(&long)),
            Err(WorkflowError::NumberTooLong {
                max: MAX_NUMBER_LEN
            })
        );
    }
}
