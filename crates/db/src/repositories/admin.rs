//! Admin account repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use super::error::RepositoryError;
use crate::entities::admins;
use crate::timestamp;

/// Admin repository.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    db: DatabaseConnection,
}

impl AdminRepository {
    /// Creates a new admin repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an active account by email (case-insensitive).
    pub async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<admins::Model>, RepositoryError> {
        Ok(admins::Entity::find()
            .filter(admins::Column::Email.eq(email.trim().to_lowercase()))
            .filter(admins::Column::IsActive.eq(true))
            .one(&self.db)
            .await?)
    }

    /// Finds an account by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<admins::Model>, RepositoryError> {
        Ok(admins::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Creates an account. The email is stored lower-cased.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        nama: &str,
        role: &str,
    ) -> Result<admins::Model, RepositoryError> {
        let now = timestamp::now();
        let admin = admins::ActiveModel {
            id: Set(Uuid::now_v7()),
            email: Set(email.trim().to_lowercase()),
            password_hash: Set(password_hash.to_string()),
            nama: Set(nama.to_string()),
            role: Set(role.to_string()),
            is_active: Set(true),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(admin.insert(&self.db).await?)
    }

    /// Records a successful login.
    pub async fn touch_login(&self, id: Uuid) -> Result<(), RepositoryError> {
        let now = timestamp::now();
        admins::ActiveModel {
            id: Set(id),
            last_login_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await?;
        Ok(())
    }

    /// Number of accounts.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(admins::Entity::find().count(&self.db).await?)
    }
}
