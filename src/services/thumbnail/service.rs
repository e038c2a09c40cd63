//! Thumbnail rendering orchestration: cache probe, loader dispatch, cache
//! population.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use super::cache::{CachedThumbnail, ThumbnailCache};
use super::loader::{LoaderRegistry, ThumbnailSource};
use crate::config::ThumbnailConfig;
use crate::errors::ThumbnailError;
use crate::models::{MediaKind, Thumbnail};

/// Front door for thumbnail requests.
///
/// Owns its cache and registry as explicit, shareable handles. Nothing
/// here is process-global, so independent services (and tests) get
/// independent caches.
pub struct ThumbnailService {
    cache: Arc<ThumbnailCache>,
    registry: Arc<LoaderRegistry>,
}

impl ThumbnailService {
    /// Service with the built-in loaders.
    pub fn new(config: &ThumbnailConfig) -> Self {
        Self::with_registry(config, Arc::new(LoaderRegistry::with_defaults(config)))
    }

    /// Service with a caller-supplied registry.
    pub fn with_registry(config: &ThumbnailConfig, registry: Arc<LoaderRegistry>) -> Self {
        Self {
            cache: Arc::new(ThumbnailCache::new(config.cache_capacity)),
            registry,
        }
    }

    /// Render a thumbnail for a filesystem-backed source. The file is
    /// classified by extension and its path doubles as the cache key.
    pub async fn render_file(
        &self,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<Thumbnail, ThumbnailError> {
        let key = path.to_string_lossy().into_owned();
        let Some(kind) = MediaKind::from_path(path) else {
            return Err(ThumbnailError::UnsupportedResource { key });
        };
        let source = ThumbnailSource::File(path.to_path_buf());
        self.render_source(key, kind, source, width, height).await
    }

    /// Render a thumbnail from in-memory bytes under an explicit cache
    /// key, for sources that are not filesystem-backed.
    pub async fn render(
        &self,
        key: &str,
        kind: MediaKind,
        data: Bytes,
        width: u32,
        height: u32,
    ) -> Result<Thumbnail, ThumbnailError> {
        let source = ThumbnailSource::Memory(data);
        self.render_source(key.to_owned(), kind, source, width, height)
            .await
    }

    async fn render_source(
        &self,
        key: String,
        kind: MediaKind,
        source: ThumbnailSource,
        width: u32,
        height: u32,
    ) -> Result<Thumbnail, ThumbnailError> {
        // The key binds to the requested box; the entry carries the actual
        // output dimensions, which may be smaller.
        let cache_key = format!("{width}x{height} {key}");
        if let Some(hit) = self.cache.get(&cache_key).await {
            return Ok(Thumbnail {
                width: hit.width,
                height: hit.height,
                data: hit.data,
            });
        }

        // Concurrent misses on the same key are not deduplicated: both
        // callers render and both insert, last write wins.
        for loader in self.registry.loaders_for(kind) {
            let task_loader = Arc::clone(loader);
            let task_source = source.clone();
            let attempt = tokio::task::spawn_blocking(move || {
                let mut actual_width = width;
                let mut actual_height = height;
                task_loader
                    .generate(&task_source, &mut actual_width, &mut actual_height)
                    .map(|bytes| (actual_width, actual_height, bytes))
            })
            .await;

            match attempt {
                Ok(Ok((actual_width, actual_height, bytes))) => {
                    let data = Bytes::from(bytes);
                    self.cache
                        .put(
                            cache_key,
                            CachedThumbnail {
                                width: actual_width,
                                height: actual_height,
                                data: data.clone(),
                            },
                        )
                        .await;
                    return Ok(Thumbnail {
                        width: actual_width,
                        height: actual_height,
                        data,
                    });
                }
                Ok(Err(err)) => {
                    debug!("{} failed to thumbnail '{}': {}", loader.name(), key, err);
                }
                Err(err) => {
                    debug!(
                        "{} panicked while thumbnailing '{}': {}",
                        loader.name(),
                        key,
                        err
                    );
                }
            }
        }

        Err(ThumbnailError::UnsupportedResource { key })
    }

    /// Shared handle to the underlying cache.
    pub fn cache(&self) -> Arc<ThumbnailCache> {
        self.cache.clone()
    }
}
