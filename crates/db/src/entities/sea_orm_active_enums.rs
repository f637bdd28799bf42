//! Postgres enum types.

use desa_core::letters;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "letter_kind")]
pub enum LetterKind {
    #[sea_orm(string_value = "kelahiran")]
    Kelahiran,
    #[sea_orm(string_value = "kematian")]
    Kematian,
    #[sea_orm(string_value = "izin_keramaian")]
    IzinKeramaian,
    #[sea_orm(string_value = "pengantar_skck")]
    PengantarSkck,
    #[sea_orm(string_value = "keterangan")]
    Keterangan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "letter_status")]
pub enum LetterStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "finish")]
    Finish,
}

impl From<letters::LetterKind> for LetterKind {
    fn from(kind: letters::LetterKind) -> Self {
        match kind {
            letters::LetterKind::Kelahiran => Self::Kelahiran,
            letters::LetterKind::Kematian => Self::Kematian,
            letters::LetterKind::IzinKeramaian => Self::IzinKeramaian,
            letters::LetterKind::PengantarSkck => Self::PengantarSkck,
            letters::LetterKind::Keterangan => Self::Keterangan,
        }
    }
}

impl From<LetterKind> for letters::LetterKind {
    fn from(kind: LetterKind) -> Self {
        match kind {
            LetterKind::Kelahiran => Self::Kelahiran,
            LetterKind::Kematian => Self::Kematian,
            LetterKind::IzinKeramaian => Self::IzinKeramaian,
            LetterKind::PengantarSkck => Self::PengantarSkck,
            LetterKind::Keterangan => Self::Keterangan,
        }
    }
}

impl From<letters::LetterStatus> for LetterStatus {
    fn from(status: letters::LetterStatus) -> Self {
        match status {
            letters::LetterStatus::Pending => Self::Pending,
            letters::LetterStatus::Finish => Self::Finish,
        }
    }
}

impl From<LetterStatus> for letters::LetterStatus {
    fn from(status: LetterStatus) -> Self {
        match status {
            LetterStatus::Pending => Self::Pending,
            LetterStatus::Finish => Self::Finish,
        }
    }
}
