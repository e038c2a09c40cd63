pub use super::cover_art::Entity as CoverArt;
pub use super::media_files::Entity as MediaFiles;
