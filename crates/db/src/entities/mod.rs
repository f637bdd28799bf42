//! `SeaORM` entity definitions.
//!
//! Columns mirror the initial migration.
#![allow(missing_docs)]

pub mod prelude;

pub mod admins;
pub mod apbdes;
pub mod dusun;
pub mod kependudukan;
pub mod letter_requests;
pub mod sea_orm_active_enums;
pub mod umkm;
