//! SeaORM-based repository for cover art rows.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, Set};
use std::sync::Arc;

use crate::entities::{cover_art, prelude::CoverArt};
use crate::models::Identity;

pub struct CoverArtSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl CoverArtSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    pub async fn exists_by_identity(&self, identity: &Identity) -> Result<bool, DbErr> {
        let count = CoverArt::find()
            .filter(cover_art::Column::Path.eq(&identity.path))
            .filter(cover_art::Column::Size.eq(identity.size as i64))
            .filter(cover_art::Column::ModifiedAt.eq(identity.modified))
            .count(&*self.connection)
            .await?;
        Ok(count > 0)
    }

    pub async fn find_by_identity(
        &self,
        identity: &Identity,
    ) -> Result<Option<cover_art::Model>, DbErr> {
        CoverArt::find()
            .filter(cover_art::Column::Path.eq(&identity.path))
            .filter(cover_art::Column::Size.eq(identity.size as i64))
            .filter(cover_art::Column::ModifiedAt.eq(identity.modified))
            .one(&*self.connection)
            .await
    }

    /// `data` is `None` when the file was analyzed and carries no cover;
    /// the row is still written so the absence itself is remembered.
    pub async fn insert(&self, identity: &Identity, data: Option<Vec<u8>>) -> Result<(), DbErr> {
        let active_model = cover_art::ActiveModel {
            id: NotSet,
            path: Set(identity.path.clone()),
            size: Set(identity.size as i64),
            modified_at: Set(identity.modified),
            data: Set(data),
            created_at: Set(chrono::Utc::now()),
        };
        active_model.insert(&*self.connection).await?;
        Ok(())
    }
}
