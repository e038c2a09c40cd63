//! Loader contract and the registry that dispatches media kinds to loaders.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use strum::IntoEnumIterator;

use crate::errors::LoaderError;
use crate::models::{MediaKind, MediaKinds};

/// Handle to the media a thumbnail is rendered from.
#[derive(Debug, Clone)]
pub enum ThumbnailSource {
    /// Filesystem-backed source; the loader reads the file itself.
    File(PathBuf),
    /// Already-loaded bytes for sources without a usable path (streamed
    /// uploads, cover art fetched from the store).
    Memory(Bytes),
}

/// A format-specific thumbnail generator.
///
/// Implementations declare the media kinds they cover via a bit-set and
/// turn a source into encoded thumbnail bytes. Declaring a kind is a claim
/// of capability, not a guarantee: any loader may still fail on a
/// particular instance (corrupt file, unsupported sub-format) and dispatch
/// falls through to the next loader in the list. Nothing else is required
/// of an implementation, so new formats plug in without touching dispatch.
pub trait ThumbnailLoader: Send + Sync {
    fn name(&self) -> &'static str;

    /// Bit-set of media kinds this loader accepts.
    fn handles(&self) -> MediaKinds;

    /// Render a thumbnail. `width`/`height` carry the requested box in and
    /// the actual output dimensions back out.
    fn generate(
        &self,
        source: &ThumbnailSource,
        width: &mut u32,
        height: &mut u32,
    ) -> Result<Vec<u8>, LoaderError>;
}

/// Per-kind loader lists, built once at startup.
///
/// Each registered loader's bit-set is inverted into an ordered list per
/// media kind. Registration order is preserved within each list and never
/// reordered at runtime, so dispatch is deterministic.
pub struct LoaderRegistry {
    loaders: HashMap<MediaKind, Vec<Arc<dyn ThumbnailLoader>>>,
}

impl LoaderRegistry {
    pub fn builder() -> LoaderRegistryBuilder {
        LoaderRegistryBuilder {
            registered: Vec::new(),
        }
    }

    /// Loaders claiming `kind`, in registration order. Empty for kinds no
    /// loader claims.
    pub fn loaders_for(&self, kind: MediaKind) -> &[Arc<dyn ThumbnailLoader>] {
        self.loaders.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub struct LoaderRegistryBuilder {
    registered: Vec<Arc<dyn ThumbnailLoader>>,
}

impl LoaderRegistryBuilder {
    pub fn register(mut self, loader: impl ThumbnailLoader + 'static) -> Self {
        self.registered.push(Arc::new(loader));
        self
    }

    pub fn register_shared(mut self, loader: Arc<dyn ThumbnailLoader>) -> Self {
        self.registered.push(loader);
        self
    }

    pub fn build(self) -> LoaderRegistry {
        let mut loaders: HashMap<MediaKind, Vec<Arc<dyn ThumbnailLoader>>> = HashMap::new();
        for kind in MediaKind::iter() {
            let list = self
                .registered
                .iter()
                .filter(|loader| loader.handles().contains(kind))
                .cloned()
                .collect();
            loaders.insert(kind, list);
        }
        LoaderRegistry { loaders }
    }
}
