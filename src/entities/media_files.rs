//! Media file descriptor entity
//!
//! One row per analyzed file, keyed by the identity tuple (path, size,
//! last-write time). Rows are immutable once written and never reclaimed;
//! a changed file simply gets a new row under its new identity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "media_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub path: String,
    pub size: i64,
    pub modified_at: DateTimeUtc,
    /// Serialized descriptor payload produced by the scanning collaborator.
    #[sea_orm(column_type = "Text")]
    pub descriptor: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
