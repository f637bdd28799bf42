//! Population snapshot repository.

use desa_core::demography::{DemographicOverview, DemographicRecord, Demographics};
use desa_shared::types::DemographicId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde_json::Value;
use uuid::Uuid;

use super::{decode, encode, error::RepositoryError};
use crate::entities::kependudukan;
use crate::timestamp;

/// Population snapshot repository.
#[derive(Debug, Clone)]
pub struct DemographicRepository {
    db: DatabaseConnection,
}

impl DemographicRepository {
    /// Creates a new repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Years with a snapshot, newest first.
    pub async fn list_years(&self) -> Result<Vec<i32>, RepositoryError> {
        Ok(kependudukan::Entity::find()
            .select_only()
            .column(kependudukan::Column::Tahun)
            .order_by_desc(kependudukan::Column::Tahun)
            .into_tuple()
            .all(&self.db)
            .await?)
    }

    /// Snapshot for the newest year.
    pub async fn latest(&self) -> Result<Option<DemographicRecord>, RepositoryError> {
        kependudukan::Entity::find()
            .order_by_desc(kependudukan::Column::Tahun)
            .one(&self.db)
            .await?
            .map(to_record)
            .transpose()
    }

    /// Snapshot for a year.
    pub async fn find_by_tahun(
        &self,
        tahun: i32,
    ) -> Result<Option<DemographicRecord>, RepositoryError> {
        self.find_model(tahun).await?.map(to_record).transpose()
    }

    /// Overview rows, newest first.
    pub async fn list_overview(&self) -> Result<Vec<DemographicOverview>, RepositoryError> {
        let models = kependudukan::Entity::find()
            .order_by_desc(kependudukan::Column::Tahun)
            .all(&self.db)
            .await?;

        models
            .into_iter()
            .map(|model| to_record(model).map(|record| DemographicOverview::from(&record)))
            .collect()
    }

    /// Stores a new snapshot; `Duplicate` when the year is taken.
    pub async fn create(&self, data: &Demographics) -> Result<DemographicRecord, RepositoryError> {
        let now = timestamp::now();
        let model = kependudukan::ActiveModel {
            id: Set(Uuid::now_v7()),
            tahun: Set(data.tahun),
            data: Set(body(data)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        to_record(model.insert(&self.db).await?)
    }

    /// Replaces the snapshot stored under `tahun`.
    pub async fn update(
        &self,
        tahun: i32,
        data: &Demographics,
    ) -> Result<DemographicRecord, RepositoryError> {
        let mut model = self
            .find_model(tahun)
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into_active_model();

        model.tahun = Set(data.tahun);
        model.data = Set(body(data)?);
        model.updated_at = Set(timestamp::now());

        to_record(model.update(&self.db).await?)
    }

    /// Deletes the snapshot for a year.
    pub async fn delete(&self, tahun: i32) -> Result<(), RepositoryError> {
        let result = kependudukan::Entity::delete_many()
            .filter(kependudukan::Column::Tahun.eq(tahun))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_model(
        &self,
        tahun: i32,
    ) -> Result<Option<kependudukan::Model>, RepositoryError> {
        Ok(kependudukan::Entity::find()
            .filter(kependudukan::Column::Tahun.eq(tahun))
            .one(&self.db)
            .await?)
    }
}

/// Stored body: the snapshot without `tahun`, which has its own column.
fn body(data: &Demographics) -> Result<Value, RepositoryError> {
    let mut value = encode(data)?;
    if let Value::Object(map) = &mut value {
        map.remove("tahun");
    }
    Ok(value)
}

fn to_record(model: kependudukan::Model) -> Result<DemographicRecord, RepositoryError> {
    let mut value = model.data;
    match &mut value {
        Value::Object(map) => {
            map.insert("tahun".to_string(), Value::from(model.tahun));
        }
        _ => return Err(RepositoryError::Corrupt("data is not an object".to_string())),
    }

    Ok(DemographicRecord {
        id: DemographicId::from_uuid(model.id),
        data: decode(value)?,
        created_at: timestamp::to_utc(model.created_at),
        updated_at: timestamp::to_utc(model.updated_at),
    })
}
