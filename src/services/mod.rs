//! Service layer: the persistent file store and the thumbnail pipeline.

pub mod file_store;
pub mod thumbnail;

pub use file_store::FileStore;
pub use thumbnail::{LoaderRegistry, ThumbnailCache, ThumbnailLoader, ThumbnailService};
