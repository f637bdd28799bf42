//! Letter kinds, statuses and stored requests.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use desa_shared::types::LetterId;
use serde::{Deserialize, Serialize};

use super::payload::LetterData;

/// The five letter services offered to citizens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterKind {
    /// Birth certificate statement.
    #[serde(rename = "surat-kelahiran")]
    Kelahiran,
    /// Death certificate statement.
    #[serde(rename = "surat-kematian")]
    Kematian,
    /// Permit for a public event.
    #[serde(rename = "surat-izin-keramaian")]
    IzinKeramaian,
    /// Referral for a police-record certificate.
    #[serde(rename = "surat-pengantar-skck")]
    PengantarSkck,
    /// General statement letter.
    #[serde(rename = "surat-keterangan")]
    Keterangan,
}

impl LetterKind {
    /// Every kind, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Kelahiran,
        Self::Kematian,
        Self::IzinKeramaian,
        Self::PengantarSkck,
        Self::Keterangan,
    ];

    /// URL segment, e.g. `surat-kelahiran`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Kelahiran => "surat-kelahiran",
            Self::Kematian => "surat-kematian",
            Self::IzinKeramaian => "surat-izin-keramaian",
            Self::PengantarSkck => "surat-pengantar-skck",
            Self::Keterangan => "surat-keterangan",
        }
    }

    /// Looks a kind up by its URL segment.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    /// Title printed on the letter.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Kelahiran => "SURAT KETERANGAN KELAHIRAN",
            Self::Kematian => "SURAT KETERANGAN KEMATIAN",
            Self::IzinKeramaian => "SURAT IZIN KERAMAIAN",
            Self::PengantarSkck => "SURAT PENGANTAR SKCK",
            Self::Keterangan => "SURAT KETERANGAN",
        }
    }
}

impl fmt::Display for LetterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Unknown letter kind in a URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown letter kind '{0}'")]
pub struct UnknownLetterKind(pub String);

impl FromStr for LetterKind {
    type Err = UnknownLetterKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| UnknownLetterKind(s.to_string()))
    }
}

/// Processing status of a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    /// Submitted, not yet processed.
    #[default]
    Pending,
    /// Processed by an admin.
    Finish,
}

impl LetterStatus {
    /// Wire and storage value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Finish => "finish",
        }
    }
}

impl fmt::Display for LetterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored letter request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterRecord {
    /// Record id.
    pub id: LetterId,
    /// Letter kind.
    pub kind: LetterKind,
    /// Processing status.
    pub status: LetterStatus,
    /// Official letter number, set by an admin.
    pub nomor_surat: Option<String>,
    /// Name the request is filed under.
    pub nama_pemohon: String,
    /// Citizen-submitted data.
    pub data: LetterData,
    /// Submission time.
    pub submitted_at: DateTime<Utc>,
    /// Last admin change.
    pub updated_at: DateTime<Utc>,
}

impl LetterRecord {
    /// A document can be generated once a letter number is set.
    #[must_use]
    pub fn is_downloadable(&self) -> bool {
        super::workflow::is_downloadable(self.nomor_surat.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for kind in LetterKind::ALL {
            assert_eq!(kind.slug().parse::<LetterKind>(), Ok(kind));
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::json!(kind.slug())
            );
        }
        assert!("surat-nikah".parse::<LetterKind>().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_value(LetterStatus::Finish).unwrap(),
            serde_json::json!("finish")
        );
        let status: LetterStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, LetterStatus::Pending);
    }
}
