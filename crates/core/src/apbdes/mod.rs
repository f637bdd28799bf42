//! APBDes (village budget) documents, total derivation and form editing.

pub mod aggregation;
pub mod editor;
pub mod error;
pub mod types;


pub use aggregation::{SurplusKind, format_rupiah, parse_amount, surplus};
pub use editor::{
    BudgetForm, EntryKey, FinancingEditor, FinancingSide, FinancingTotals, KeyedList,
    SectionEditor, SectionId, SectionTotals,
};
pub use error::{AggregationError, EditorError};
pub use types::{
    BudgetOverview, BudgetPlan, BudgetRecord, FinancingFlow, FinancingLine, Pembiayaan, Rincian,
    Ringkasan, Rupiah, Section, SubRincian,
};
