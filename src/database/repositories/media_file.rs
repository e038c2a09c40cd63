//! SeaORM-based repository for media file descriptor rows.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet,
    QueryFilter, Set};
use std::sync::Arc;

use crate::entities::{media_files, prelude::MediaFiles};
use crate::models::Identity;

pub struct MediaFileSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl MediaFileSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Find the descriptor row whose (path, size, modified_at) tuple
    /// exactly matches `identity`. Both sides compare last-write time.
    pub async fn find_by_identity(
        &self,
        identity: &Identity,
    ) -> Result<Option<media_files::Model>, DbErr> {
        MediaFiles::find()
            .filter(media_files::Column::Path.eq(&identity.path))
            .filter(media_files::Column::Size.eq(identity.size as i64))
            .filter(media_files::Column::ModifiedAt.eq(identity.modified))
            .one(&*self.connection)
            .await
    }

    pub async fn insert(&self, identity: &Identity, descriptor: String) -> Result<(), DbErr> {
        let active_model = media_files::ActiveModel {
            id: NotSet,
            path: Set(identity.path.clone()),
            size: Set(identity.size as i64),
            modified_at: Set(identity.modified),
            descriptor: Set(descriptor),
            created_at: Set(chrono::Utc::now()),
        };
        active_model.insert(&*self.connection).await?;
        Ok(())
    }
}
