//! Citizen letter requests: payloads, admin processing and generated
//! documents.

pub mod document;
pub mod error;
pub mod payload;
pub mod render;
pub mod types;
pub mod workflow;

pub use document::{LetterDocument, compose, format_tanggal, letter_filename, today_in_jakarta};
pub use error::{DocumentError, WorkflowError};
pub use payload::{
    BirthReport, DeathReport, EventPermit, GeneralStatement, JenisKelamin, LetterData, SkckReferral,
};
pub use render::render_pdf;
pub use types::{LetterKind, LetterRecord, LetterStatus, UnknownLetterKind};
pub use workflow::{LetterChange, LetterUpdate, LetterWorkflow, Transition, is_downloadable};
