//! Thumbnail rendering pipeline.
//!
//! A bounded LRU cache of rendered thumbnails fronts a set of pluggable,
//! format-specific loaders:
//!
//! - [`ThumbnailCache`] holds previously rendered buffers keyed by
//!   `"{width}x{height} {source key}"`
//! - [`LoaderRegistry`] maps each media kind to the ordered loaders that
//!   claim it
//! - [`ThumbnailService`] probes the cache, dispatches misses through the
//!   registry and populates the cache with the winner's output

pub mod cache;
pub mod loader;
pub mod loaders;
pub mod resize;
pub mod service;

pub use cache::{CachedThumbnail, ThumbnailCache};
pub use loader::{LoaderRegistry, LoaderRegistryBuilder, ThumbnailLoader, ThumbnailSource};
pub use loaders::{CoverArtLoader, ImageFileLoader};
pub use service::ThumbnailService;
