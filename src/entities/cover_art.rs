//! Cover art entity
//!
//! Keyed by the same identity tuple as the owning media file row, but kept
//! in its own table so cover lookups never deserialize descriptor payloads.
//! `data` is NULL for files that were analyzed and found to carry no cover.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cover_art")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub path: String,
    pub size: i64,
    pub modified_at: DateTimeUtc,
    pub data: Option<Vec<u8>>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
