//! APBDes document types.
//!
//! Amounts are whole Rupiah. Totals stored on the document are derived
//! values; see [`BudgetPlan::recompute`](super::aggregation).

use chrono::{DateTime, Utc};
use desa_shared::types::BudgetPlanId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::not_blank;

/// Whole Rupiah.
pub type Rupiah = i64;

/// Earliest and latest budget year accepted.
pub const MIN_TAHUN: i32 = 2000;
/// See [`MIN_TAHUN`].
pub const MAX_TAHUN: i32 = 2100;

/// Leaf line of a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SubRincian {
    /// Description.
    #[validate(custom(function = "not_blank"))]
    pub uraian: String,
    /// Amount.
    #[serde(default)]
    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif"))]
    pub jumlah: Rupiah,
}

/// Category of an income or expenditure section.
///
/// When `sub_rincian` is non-empty, `jumlah` is derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Rincian {
    /// Description.
    #[validate(custom(function = "not_blank"))]
    pub uraian: String,
    /// Amount.
    #[serde(default)]
    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif"))]
    pub jumlah: Rupiah,
    /// Optional decomposition.
    #[serde(default)]
    #[validate(nested)]
    pub sub_rincian: Vec<SubRincian>,
}

/// Income (`pendapatan`) or expenditure (`belanja`) section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Section {
    /// Sum of category amounts.
    #[serde(default)]
    pub total: Rupiah,
    /// Categories in display order.
    #[serde(default)]
    #[validate(nested)]
    pub rincian: Vec<Rincian>,
}

/// Financing line; the amount is entered directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FinancingLine {
    /// Description.
    #[validate(custom(function = "not_blank"))]
    pub uraian: String,
    /// Amount.
    #[serde(default)]
    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif"))]
    pub jumlah: Rupiah,
}

/// One direction of financing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FinancingFlow {
    /// Sum of line amounts.
    #[serde(default)]
    pub total: Rupiah,
    /// Lines in display order.
    #[serde(default)]
    #[validate(nested)]
    pub rincian: Vec<FinancingLine>,
}

/// Financing section (`pembiayaan`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Pembiayaan {
    /// Financing received.
    #[serde(default)]
    #[validate(nested)]
    pub penerimaan: FinancingFlow,
    /// Financing paid out.
    #[serde(default)]
    #[validate(nested)]
    pub pengeluaran: FinancingFlow,
    /// `penerimaan.total - pengeluaran.total`.
    #[serde(default)]
    pub surplus: Rupiah,
}

/// Headline figures (`ringkasan`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ringkasan {
    /// Income total.
    pub pendapatan: Rupiah,
    /// Expenditure total.
    pub belanja: Rupiah,
    /// Financing received.
    pub pembiayaan_penerimaan: Rupiah,
    /// Financing paid.
    pub pembiayaan_pengeluaran: Rupiah,
    /// Overall surplus (negative = deficit).
    pub surplus: Rupiah,
}

/// A yearly APBDes document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BudgetPlan {
    /// Budget year; unique.
    #[validate(range(min = 2000, max = 2100, message = "Tahun harus antara 2000 dan 2100"))]
    pub tahun: i32,
    /// Summary. Ignored on input and re-derived.
    #[serde(default)]
    pub ringkasan: Ringkasan,
    /// Income.
    #[serde(default)]
    #[validate(nested)]
    pub pendapatan: Section,
    /// Expenditure.
    #[serde(default)]
    #[validate(nested)]
    pub belanja: Section,
    /// Financing.
    #[serde(default)]
    #[validate(nested)]
    pub pembiayaan: Pembiayaan,
}

/// A stored APBDes document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetRecord {
    /// Record id.
    pub id: BudgetPlanId,
    /// Document body.
    #[serde(flatten)]
    pub plan: BudgetPlan,
    /// Created.
    pub created_at: DateTime<Utc>,
    /// Last modified.
    pub updated_at: DateTime<Utc>,
}

/// List row for the admin overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetOverview {
    /// Record id.
    pub id: BudgetPlanId,
    /// Budget year.
    pub tahun: i32,
    /// Headline figures.
    pub ringkasan: Ringkasan,
    /// Last modified.
    pub updated_at: DateTime<Utc>,
}

impl From<&BudgetRecord> for BudgetOverview {
    fn from(record: &BudgetRecord) -> Self {
        Self {
            id: record.id,
            tahun: record.plan.tahun,
            ringkasan: record.plan.ringkasan,
            updated_at: record.updated_at,
        }
    }
}
