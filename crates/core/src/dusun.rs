//! Hamlet (dusun) profiles.

use chrono::{DateTime, Utc};
use desa_shared::types::DusunId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{image_url, not_blank};

/// Profile fields as submitted by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DusunInput {
    /// Hamlet name.
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub nama: String,
    /// Head of hamlet.
    #[validate(custom(function = "not_blank"))]
    pub kepala_dusun: String,
    /// Free-form description.
    #[serde(default)]
    pub deskripsi: String,
    /// Households.
    #[serde(default)]
    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif"))]
    pub jumlah_kk: i32,
    /// Residents.
    #[serde(default)]
    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif"))]
    pub jumlah_penduduk: i32,
    /// Optional photo URL.
    #[serde(default)]
    #[validate(custom(function = "image_url"))]
    pub gambar: Option<String>,
}

/// A stored profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DusunProfile {
    /// Record id.
    pub id: DusunId,
    /// Profile fields.
    #[serde(flatten)]
    pub data: DusunInput,
    /// Created.
    pub created_at: DateTime<Utc>,
    /// Last modified.
    pub updated_at: DateTime<Utc>,
}
