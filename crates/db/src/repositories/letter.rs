//! Letter request repository.
//!
//! Every lookup is scoped by kind: an id submitted as a birth report is not
//! reachable through the death-report endpoints.

use desa_core::letters::{LetterChange, LetterData, LetterKind, LetterRecord, LetterStatus};
use desa_shared::types::{LetterId, PageRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use tracing::info;

use super::error::RepositoryError;
use crate::entities::{letter_requests, sea_orm_active_enums};
use crate::timestamp;

/// Letter request repository.
#[derive(Debug, Clone)]
pub struct LetterRepository {
    db: DatabaseConnection,
}

impl LetterRepository {
    /// Creates a new letter repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a new request as `pending` with no letter number.
    pub async fn create(&self, data: &LetterData) -> Result<LetterRecord, RepositoryError> {
        let now = timestamp::now();
        let model = letter_requests::ActiveModel {
            id: Set(LetterId::new().into_inner()),
            kind: Set(data.kind().into()),
            status: Set(sea_orm_active_enums::LetterStatus::Pending),
            nomor_surat: Set(None),
            nama_pemohon: Set(data.applicant_name().trim().to_string()),
            data: Set(data.to_json()?),
            submitted_at: Set(now),
            updated_at: Set(now),
        };

        let record = to_record(model.insert(&self.db).await?)?;
        info!(letter_id = %record.id, kind = %record.kind, "Letter request filed");
        Ok(record)
    }

    /// One page of requests of a kind, newest first, with the total count.
    pub async fn list(
        &self,
        kind: LetterKind,
        status: Option<LetterStatus>,
        page: &PageRequest,
    ) -> Result<(Vec<LetterRecord>, u64), RepositoryError> {
        let total = filtered(kind, status).count(&self.db).await?;
        let models = filtered(kind, status)
            .order_by_desc(letter_requests::Column::SubmittedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let records = models
            .into_iter()
            .map(to_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((records, total))
    }

    /// Finds a request of the given kind.
    pub async fn find(
        &self,
        kind: LetterKind,
        id: LetterId,
    ) -> Result<Option<LetterRecord>, RepositoryError> {
        self.find_model(kind, id).await?.map(to_record).transpose()
    }

    /// Stores the outcome of an admin update.
    pub async fn update(
        &self,
        kind: LetterKind,
        id: LetterId,
        change: &LetterChange,
    ) -> Result<LetterRecord, RepositoryError> {
        let mut model = self
            .find_model(kind, id)
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into_active_model();

        model.status = Set(change.status.into());
        model.nomor_surat = Set(change.nomor_surat.clone());
        model.updated_at = Set(timestamp::now());

        to_record(model.update(&self.db).await?)
    }

    /// Deletes a request of the given kind.
    pub async fn delete(&self, kind: LetterKind, id: LetterId) -> Result<(), RepositoryError> {
        let result = letter_requests::Entity::delete_many()
            .filter(letter_requests::Column::Id.eq(id.into_inner()))
            .filter(letter_requests::Column::Kind.eq(sea_orm_active_enums::LetterKind::from(kind)))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_model(
        &self,
        kind: LetterKind,
        id: LetterId,
    ) -> Result<Option<letter_requests::Model>, RepositoryError> {
        Ok(filtered(kind, None)
            .filter(letter_requests::Column::Id.eq(id.into_inner()))
            .one(&self.db)
            .await?)
    }
}

fn filtered(kind: LetterKind, status: Option<LetterStatus>) -> Select<letter_requests::Entity> {
    let mut query = letter_requests::Entity::find()
        .filter(letter_requests::Column::Kind.eq(sea_orm_active_enums::LetterKind::from(kind)));
    if let Some(status) = status {
        query = query.filter(
            letter_requests::Column::Status.eq(sea_orm_active_enums::LetterStatus::from(status)),
        );
    }
    query
}

fn to_record(model: letter_requests::Model) -> Result<LetterRecord, RepositoryError> {
    let kind = LetterKind::from(model.kind);
    Ok(LetterRecord {
        id: LetterId::from_uuid(model.id),
        kind,
        status: model.status.into(),
        nomor_surat: model.nomor_surat,
        nama_pemohon: model.nama_pemohon,
        data: LetterData::from_json(kind, model.data)?,
        submitted_at: timestamp::to_utc(model.submitted_at),
        updated_at: timestamp::to_utc(model.updated_at),
    })
}
