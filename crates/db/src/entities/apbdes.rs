//! `SeaORM` Entity for apbdes table.
//!
//! Sections are stored as JSONB documents.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "apbdes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub tahun: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub ringkasan: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub pendapatan: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub belanja: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub pembiayaan: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
