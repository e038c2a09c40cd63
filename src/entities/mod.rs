//! SeaORM entity definitions for the persistent store tables.

pub mod cover_art;
pub mod media_files;
pub mod prelude;
