//! Repository layer for the persistent store tables.
//!
//! Thin data-access wrappers over SeaORM; the read/write failure policy
//! (what is swallowed, what is surfaced) belongs to the service layer.

pub mod cover_art;
pub mod media_file;

pub use cover_art::CoverArtSeaOrmRepository;
pub use media_file::MediaFileSeaOrmRepository;
