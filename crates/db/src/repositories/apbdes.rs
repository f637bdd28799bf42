//! APBDes repository. One document per year; sections are JSONB.

use desa_core::apbdes::{BudgetOverview, BudgetPlan, BudgetRecord, Ringkasan};
use desa_shared::types::BudgetPlanId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::{decode, encode, error::RepositoryError};
use crate::entities::apbdes;
use crate::timestamp;

/// APBDes repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new APBDes repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Years that have a document, newest first.
    pub async fn list_years(&self) -> Result<Vec<i32>, RepositoryError> {
        Ok(apbdes::Entity::find()
            .select_only()
            .column(apbdes::Column::Tahun)
            .order_by_desc(apbdes::Column::Tahun)
            .into_tuple()
            .all(&self.db)
            .await?)
    }

    /// Document for the newest year.
    pub async fn latest(&self) -> Result<Option<BudgetRecord>, RepositoryError> {
        apbdes::Entity::find()
            .order_by_desc(apbdes::Column::Tahun)
            .one(&self.db)
            .await?
            .map(to_record)
            .transpose()
    }

    /// Document for a year.
    pub async fn find_by_tahun(&self, tahun: i32) -> Result<Option<BudgetRecord>, RepositoryError> {
        self.find_model(tahun).await?.map(to_record).transpose()
    }

    /// Headline figures for every year, newest first.
    pub async fn list_overview(&self) -> Result<Vec<BudgetOverview>, RepositoryError> {
        let models = apbdes::Entity::find()
            .order_by_desc(apbdes::Column::Tahun)
            .all(&self.db)
            .await?;

        models
            .into_iter()
            .map(|model| {
                Ok(BudgetOverview {
                    id: BudgetPlanId::from_uuid(model.id),
                    tahun: model.tahun,
                    ringkasan: decode::<Ringkasan>(model.ringkasan)?,
                    updated_at: timestamp::to_utc(model.updated_at),
                })
            })
            .collect()
    }

    /// Stores a new document. The plan must already be recomputed.
    ///
    /// Returns `Duplicate` when the year is taken.
    pub async fn create(&self, plan: &BudgetPlan) -> Result<BudgetRecord, RepositoryError> {
        let now = timestamp::now();
        let model = apbdes::ActiveModel {
            id: Set(Uuid::now_v7()),
            tahun: Set(plan.tahun),
            ringkasan: Set(encode(&plan.ringkasan)?),
            pendapatan: Set(encode(&plan.pendapatan)?),
            belanja: Set(encode(&plan.belanja)?),
            pembiayaan: Set(encode(&plan.pembiayaan)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        to_record(model.insert(&self.db).await?)
    }

    /// Replaces the document stored under `tahun`.
    ///
    /// `plan.tahun` may differ from `tahun`, which moves the document to
    /// another year; that fails with `Duplicate` if the target year is taken.
    pub async fn update(
        &self,
        tahun: i32,
        plan: &BudgetPlan,
    ) -> Result<BudgetRecord, RepositoryError> {
        let mut model = self
            .find_model(tahun)
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into_active_model();

        model.tahun = Set(plan.tahun);
        model.ringkasan = Set(encode(&plan.ringkasan)?);
        model.pendapatan = Set(encode(&plan.pendapatan)?);
        model.belanja = Set(encode(&plan.belanja)?);
        model.pembiayaan = Set(encode(&plan.pembiayaan)?);
        model.updated_at = Set(timestamp::now());

        to_record(model.update(&self.db).await?)
    }

    /// Deletes the document for a year.
    pub async fn delete(&self, tahun: i32) -> Result<(), RepositoryError> {
        let result = apbdes::Entity::delete_many()
            .filter(apbdes::Column::Tahun.eq(tahun))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_model(&self, tahun: i32) -> Result<Option<apbdes::Model>, RepositoryError> {
        Ok(apbdes::Entity::find()
            .filter(apbdes::Column::Tahun.eq(tahun))
            .one(&self.db)
            .await?)
    }
}

fn to_record(model: apbdes::Model) -> Result<BudgetRecord, RepositoryError> {
    Ok(BudgetRecord {
        id: BudgetPlanId::from_uuid(model.id),
        plan: BudgetPlan {
            tahun: model.tahun,
            ringkasan: decode(model.ringkasan)?,
            pendapatan: decode(model.pendapatan)?,
            belanja: decode(model.belanja)?,
            pembiayaan: decode(model.pembiayaan)?,
        },
        created_at: timestamp::to_utc(model.created_at),
        updated_at: timestamp::to_utc(model.updated_at),
    })
}
