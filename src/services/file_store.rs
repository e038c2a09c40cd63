//! Identity-keyed persistent store for file descriptors and cover art.
//!
//! The filesystem scanner consults this store before parsing a file from
//! scratch: if a descriptor row exists under the file's current identity
//! tuple the earlier analysis is reused. Reads degrade to misses on
//! failure; writes and corrupt covers are surfaced (see
//! [`crate::errors::StoreError`] for the split).

use anyhow::Result;
use bytes::Bytes;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::config::DatabaseConfig;
use crate::database::Database;
use crate::database::repositories::{CoverArtSeaOrmRepository, MediaFileSeaOrmRepository};
use crate::errors::StoreError;
use crate::models::{FileRecord, Identity, StoredFileRecord};

struct StoreHandle {
    database: Database,
    files: MediaFileSeaOrmRepository,
    covers: CoverArtSeaOrmRepository,
}

/// Persistent store over a single SQLite database file.
///
/// One coarse lock serializes all store access; store traffic is rare next
/// to thumbnail cache hits, so contention is not a concern. The thumbnail
/// cache lock is never taken while this one is held.
pub struct FileStore {
    handle: Mutex<Option<StoreHandle>>,
}

impl FileStore {
    /// Open (or create) the store database at the configured path. Failure
    /// to open or migrate is fatal to construction.
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        let database = Database::connect(config).await?;
        database.migrate().await?;
        let connection = database.connection();
        Ok(Self {
            handle: Mutex::new(Some(StoreHandle {
                files: MediaFileSeaOrmRepository::new(connection.clone()),
                covers: CoverArtSeaOrmRepository::new(connection),
                database,
            })),
        })
    }

    /// True iff a cover row exists whose key exactly equals `identity`.
    /// Query failures count as "no cover" and are never propagated.
    pub async fn has_cover(&self, identity: &Identity) -> bool {
        let guard = self.handle.lock().await;
        let Some(handle) = guard.as_ref() else {
            return false;
        };
        match handle.covers.exists_by_identity(identity).await {
            Ok(exists) => exists,
            Err(err) => {
                error!(
                    "Failed to look up cover existence for {}: {}",
                    identity.path, err
                );
                false
            }
        }
    }

    /// Cover payload for `identity`, if one was stored. `Ok(None)` covers
    /// both "no row" and "analyzed, no cover". A row that cannot be read
    /// back means the store itself is damaged and is re-raised as
    /// [`StoreError::CorruptCover`].
    pub async fn get_cover(&self, identity: &Identity) -> Result<Option<Bytes>, StoreError> {
        let guard = self.handle.lock().await;
        let Some(handle) = guard.as_ref() else {
            return Ok(None);
        };
        match handle.covers.find_by_identity(identity).await {
            Ok(row) => Ok(row.and_then(|r| r.data).map(Bytes::from)),
            Err(err) => {
                error!("Failed to read a stored cover for {}: {}", identity.path, err);
                Err(StoreError::CorruptCover {
                    path: identity.path.clone(),
                    source: err,
                })
            }
        }
    }

    /// Descriptor stored under `identity`, or `None`. Read and
    /// deserialization failures also yield `None`: callers fall back to
    /// re-analyzing the file, which is always safe.
    pub async fn get_file_descriptor(&self, identity: &Identity) -> Option<StoredFileRecord> {
        let guard = self.handle.lock().await;
        let handle = guard.as_ref()?;
        let model = match handle.files.find_by_identity(identity).await {
            Ok(model) => model?,
            Err(err) => {
                debug!(
                    "Failed to read a stored descriptor for {}: {}",
                    identity.path, err
                );
                return None;
            }
        };
        match serde_json::from_str(&model.descriptor) {
            Ok(descriptor) => Some(StoredFileRecord {
                identity: identity.clone(),
                descriptor,
            }),
            Err(err) => {
                debug!(
                    "Failed to deserialize descriptor for {}: {}",
                    identity.path, err
                );
                None
            }
        }
    }

    /// Persist a record's descriptor and cover. Records that report no
    /// serialized descriptor are skipped silently so callers can hand over
    /// everything they produce. The descriptor and cover rows are two
    /// independent inserts, not a transaction; a crash between them leaves
    /// a descriptor without its cover row.
    pub async fn put(&self, record: &dyn FileRecord) -> Result<(), StoreError> {
        let guard = self.handle.lock().await;
        let Some(handle) = guard.as_ref() else {
            return Err(StoreError::Closed);
        };
        let Some(descriptor) = record.serialized_descriptor() else {
            return Ok(());
        };

        let identity = record.identity();
        if let Err(err) = handle.files.insert(identity, descriptor.to_string()).await {
            error!("Failed to store descriptor for {}: {}", identity.path, err);
            return Err(StoreError::Write(err));
        }

        let cover = record.cover().map(|bytes| bytes.to_vec());
        if let Err(err) = handle.covers.insert(identity, cover).await {
            error!("Failed to store cover for {}: {}", identity.path, err);
            return Err(StoreError::Write(err));
        }

        Ok(())
    }

    /// Release the database handle. Safe to call more than once; reads
    /// after close report misses and writes fail with
    /// [`StoreError::Closed`].
    pub async fn close(&self) {
        let mut guard = self.handle.lock().await;
        if let Some(handle) = guard.take() {
            let StoreHandle {
                database,
                files,
                covers,
            } = handle;
            // Repositories hold connection clones; release them so the
            // pool can actually shut down.
            drop(files);
            drop(covers);
            if let Err(err) = database.close().await {
                warn!("Failed to close store database cleanly: {}", err);
            }
        }
    }
}
