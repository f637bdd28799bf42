//! UMKM listing repository.

use desa_core::umkm::{UmkmInput, UmkmListing};
use desa_shared::types::{PageRequest, UmkmId};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryOrder, QuerySelect, Set,
};

use super::{decode, encode, error::RepositoryError};
use crate::entities::umkm;
use crate::timestamp;

/// UMKM listing repository.
#[derive(Debug, Clone)]
pub struct UmkmRepository {
    db: DatabaseConnection,
}

impl UmkmRepository {
    /// Creates a new UMKM repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// One page of listings, newest first, with the total count.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<UmkmListing>, u64), RepositoryError> {
        let total = umkm::Entity::find().count(&self.db).await?;
        let models = umkm::Entity::find()
            .order_by_desc(umkm::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let listings = models
            .into_iter()
            .map(to_listing)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((listings, total))
    }

    /// Finds a listing by ID.
    pub async fn find(&self, id: UmkmId) -> Result<Option<UmkmListing>, RepositoryError> {
        umkm::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(to_listing)
            .transpose()
    }

    /// Creates a listing.
    pub async fn create(&self, input: &UmkmInput) -> Result<UmkmListing, RepositoryError> {
        let now = timestamp::now();
        let model = umkm::ActiveModel {
            id: Set(UmkmId::new().into_inner()),
            nama: Set(input.nama.trim().to_string()),
            deskripsi: Set(input.deskripsi.clone()),
            harga: Set(input.harga.trim().to_string()),
            whatsapp: Set(input.whatsapp.trim().to_string()),
            gambar: Set(encode(&input.gambar)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        to_listing(model.insert(&self.db).await?)
    }

    /// Replaces a listing's fields.
    pub async fn update(
        &self,
        id: UmkmId,
        input: &UmkmInput,
    ) -> Result<UmkmListing, RepositoryError> {
        let mut model = umkm::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into_active_model();

        model.nama = Set(input.nama.trim().to_string());
        model.deskripsi = Set(input.deskripsi.clone());
        model.harga = Set(input.harga.trim().to_string());
        model.whatsapp = Set(input.whatsapp.trim().to_string());
        model.gambar = Set(encode(&input.gambar)?);
        model.updated_at = Set(timestamp::now());

        to_listing(model.update(&self.db).await?)
    }

    /// Deletes a listing.
    pub async fn delete(&self, id: UmkmId) -> Result<(), RepositoryError> {
        let result = umkm::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

fn to_listing(model: umkm::Model) -> Result<UmkmListing, RepositoryError> {
    Ok(UmkmListing {
        id: UmkmId::from_uuid(model.id),
        data: UmkmInput {
            nama: model.nama,
            deskripsi: model.deskripsi,
            harga: model.harga,
            whatsapp: model.whatsapp,
            gambar: decode(model.gambar)?,
        },
        created_at: timestamp::to_utc(model.created_at),
        updated_at: timestamp::to_utc(model.updated_at),
    })
}
