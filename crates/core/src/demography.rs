//! Yearly population snapshots (`kependudukan`).

use chrono::{DateTime, Utc};
use desa_shared::error::{FieldErrors, flatten_validation_errors};
use desa_shared::types::DemographicId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::not_blank;

/// A (label, count) pair of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LabelCount {
    /// Group label, e.g. "SD/sederajat".
    #[validate(custom(function = "not_blank"))]
    pub label: String,
    /// Number of residents.
    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif"))]
    pub jumlah: i64,
}

/// Gender counts for one hamlet. `total` must equal the sum of both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DusunPopulation {
    /// Hamlet name.
    #[validate(custom(function = "not_blank"))]
    pub nama: String,
    /// Male residents.
    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif"))]
    pub laki_laki: i64,
    /// Female residents.
    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif"))]
    pub perempuan: i64,
    /// All residents.
    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif"))]
    pub total: i64,
}

impl DusunPopulation {
    /// True when `total == laki_laki + perempuan`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.laki_laki.checked_add(self.perempuan) == Some(self.total)
    }
}

/// Body of a yearly snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Demographics {
    /// Year; unique.
    #[validate(range(min = 2000, max = 2100, message = "Tahun harus antara 2000 dan 2100"))]
    pub tahun: i32,
    /// Gender per hamlet.
    #[serde(default)]
    #[validate(nested)]
    pub dusun: Vec<DusunPopulation>,
    /// Age groups.
    #[serde(default)]
    #[validate(nested)]
    pub kelompok_umur: Vec<LabelCount>,
    /// Education.
    #[serde(default)]
    #[validate(nested)]
    pub pendidikan: Vec<LabelCount>,
    /// Occupation.
    #[serde(default)]
    #[validate(nested)]
    pub pekerjaan: Vec<LabelCount>,
    /// Voter eligibility.
    #[serde(default)]
    #[validate(nested)]
    pub wajib_pilih: Vec<LabelCount>,
    /// Marital status.
    #[serde(default)]
    #[validate(nested)]
    pub perkawinan: Vec<LabelCount>,
    /// Religion.
    #[serde(default)]
    #[validate(nested)]
    pub agama: Vec<LabelCount>,
}

/// Headline figures derived from the hamlet table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DemographicSummary {
    /// All residents.
    pub total_penduduk: i64,
    /// Male residents.
    pub laki_laki: i64,
    /// Female residents.
    pub perempuan: i64,
    /// Number of hamlets.
    pub jumlah_dusun: usize,
}

impl Demographics {
    /// Field rules plus the per-hamlet total invariant.
    ///
    /// Errors are keyed like `dusun[1].total`.
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => flatten_validation_errors(&e),
        };

        for (index, row) in self.dusun.iter().enumerate() {
            if !row.is_consistent() {
                errors
                    .entry(format!("dusun[{index}].total"))
                    .or_default()
                    .push("Total harus sama dengan jumlah laki-laki dan perempuan".to_string());
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Totals over all hamlets.
    #[must_use]
    pub fn summary(&self) -> DemographicSummary {
        self.dusun
            .iter()
            .fold(DemographicSummary::default(), |acc, row| DemographicSummary {
                total_penduduk: acc.total_penduduk.saturating_add(row.total),
                laki_laki: acc.laki_laki.saturating_add(row.laki_laki),
                perempuan: acc.perempuan.saturating_add(row.perempuan),
                jumlah_dusun: acc.jumlah_dusun + 1,
            })
    }
}

/// A stored snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemographicRecord {
    /// Record id.
    pub id: DemographicId,
    /// Snapshot body.
    #[serde(flatten)]
    pub data: Demographics,
    /// Created.
    pub created_at: DateTime<Utc>,
    /// Last modified.
    pub updated_at: DateTime<Utc>,
}

/// Admin overview row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemographicOverview {
    /// Record id.
    pub id: DemographicId,
    /// Year.
    pub tahun: i32,
    /// Headline figures.
    pub ringkasan: DemographicSummary,
    /// Last modified.
    pub updated_at: DateTime<Utc>,
}

impl From<&DemographicRecord> for DemographicOverview {
    fn from(record: &DemographicRecord) -> Self {
        Self {
            id: record.id,
            tahun: record.data.tahun,
            ringkasan: record.data.summary(),
            updated_at: record.updated_at,
        }
    }
}
