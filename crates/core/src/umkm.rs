//! UMKM (micro and small enterprise) listings.

use chrono::{DateTime, Utc};
use desa_shared::types::UmkmId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{image_urls, not_blank, phone, whatsapp_international};

/// Listing fields as submitted by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UmkmInput {
    /// Business or product name.
    #[validate(custom(function = "not_blank"), length(max = 120))]
    pub nama: String,
    /// Description.
    #[validate(custom(function = "not_blank"))]
    pub deskripsi: String,
    /// Price as free text, e.g. "Rp 15.000 / bungkus".
    #[validate(custom(function = "not_blank"), length(max = 60))]
    pub harga: String,
    /// WhatsApp contact.
    #[validate(custom(function = "phone"))]
    pub whatsapp: String,
    /// Image URLs; at least one.
    #[validate(custom(function = "image_urls"))]
    pub gambar: Vec<String>,
}

/// A stored listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UmkmListing {
    /// Record id.
    pub id: UmkmId,
    /// Listing fields.
    #[serde(flatten)]
    pub data: UmkmInput,
    /// Created.
    pub created_at: DateTime<Utc>,
    /// Last modified.
    pub updated_at: DateTime<Utc>,
}

impl UmkmListing {
    /// `https://wa.me/...` chat link, when the stored number is usable.
    #[must_use]
    pub fn whatsapp_link(&self) -> Option<String> {
        whatsapp_international(&self.data.whatsapp).map(|n| format!("https://wa.me/{n}"))
    }
}
