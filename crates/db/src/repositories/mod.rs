//! Repository abstractions for data access.
//!
//! Repositories take and return domain types from `desa-core`; entity
//! models never leave this crate.

pub mod admin;
pub mod apbdes;
pub mod dusun;
pub mod error;
pub mod kependudukan;
pub mod letter;
pub mod umkm;

pub use admin::AdminRepository;
pub use apbdes::BudgetRepository;
pub use dusun::DusunRepository;
pub use error::RepositoryError;
pub use kependudukan::DemographicRepository;
pub use letter::LetterRepository;
pub use umkm::UmkmRepository;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

fn encode<T: Serialize>(value: &T) -> Result<Value, RepositoryError> {
    Ok(serde_json::to_value(value)?)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, RepositoryError> {
    Ok(serde_json::from_value(value)?)
}
