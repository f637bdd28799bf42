//! `SeaORM` Entity for letter_requests table.
//!
//! All five letter kinds share the table; `kind` tells them apart and
//! `data` holds the kind-specific payload.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{LetterKind, LetterStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "letter_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: LetterKind,
    pub status: LetterStatus,
    pub nomor_surat: Option<String>,
    pub nama_pemohon: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub data: Json,
    pub submitted_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
