//! Hamlet profile repository.

use desa_core::dusun::{DusunInput, DusunProfile};
use desa_shared::types::DusunId;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set};

use super::error::RepositoryError;
use crate::entities::dusun;
use crate::timestamp;

/// Hamlet profile repository.
#[derive(Debug, Clone)]
pub struct DusunRepository {
    db: DatabaseConnection,
}

impl DusunRepository {
    /// Creates a new hamlet repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All profiles ordered by name.
    pub async fn list(&self) -> Result<Vec<DusunProfile>, RepositoryError> {
        let models = dusun::Entity::find()
            .order_by_asc(dusun::Column::Nama)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(to_profile).collect())
    }

    /// Finds a profile by ID.
    pub async fn find(&self, id: DusunId) -> Result<Option<DusunProfile>, RepositoryError> {
        Ok(dusun::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(to_profile))
    }

    /// Creates a profile.
    pub async fn create(&self, input: &DusunInput) -> Result<DusunProfile, RepositoryError> {
        let now = timestamp::now();
        let model = dusun::ActiveModel {
            id: Set(DusunId::new().into_inner()),
            nama: Set(input.nama.trim().to_string()),
            kepala_dusun: Set(input.kepala_dusun.trim().to_string()),
            deskripsi: Set(input.deskripsi.clone()),
            jumlah_kk: Set(input.jumlah_kk),
            jumlah_penduduk: Set(input.jumlah_penduduk),
            gambar: Set(input.gambar.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(to_profile(model.insert(&self.db).await?))
    }

    /// Replaces a profile's fields.
    pub async fn update(
        &self,
        id: DusunId,
        input: &DusunInput,
    ) -> Result<DusunProfile, RepositoryError> {
        let mut model = dusun::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into_active_model();

        model.nama = Set(input.nama.trim().to_string());
        model.kepala_dusun = Set(input.kepala_dusun.trim().to_string());
        model.deskripsi = Set(input.deskripsi.clone());
        model.jumlah_kk = Set(input.jumlah_kk);
        model.jumlah_penduduk = Set(input.jumlah_penduduk);
        model.gambar = Set(input.gambar.clone());
        model.updated_at = Set(timestamp::now());

        Ok(to_profile(model.update(&self.db).await?))
    }

    /// Deletes a profile.
    pub async fn delete(&self, id: DusunId) -> Result<(), RepositoryError> {
        let result = dusun::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

fn to_profile(model: dusun::Model) -> DusunProfile {
    DusunProfile {
        id: DusunId::from_uuid(model.id),
        data: DusunInput {
            nama: model.nama,
            kepala_dusun: model.kepala_dusun,
            deskripsi: model.deskripsi,
            jumlah_kk: model.jumlah_kk,
            jumlah_penduduk: model.jumlah_penduduk,
            gambar: model.gambar,
        },
        created_at: timestamp::to_utc(model.created_at),
        updated_at: timestamp::to_utc(model.updated_at),
    }
}
