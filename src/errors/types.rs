//! Error type definitions for the media-thumbs crate.

use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors (SeaORM)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Persistent store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Thumbnail rendering errors
    #[error("Thumbnail error: {0}")]
    Thumbnail(#[from] ThumbnailError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl AppError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Persistent store failures that are surfaced to callers.
///
/// Read failures never appear here: the store degrades them to misses so the
/// scanning collaborator transparently re-analyzes the file. Writes and
/// corrupt covers are the two cases worth reporting.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A descriptor or cover insert failed. Losing the write would only
    /// cause redundant re-computation later, but the caller should know.
    #[error("store write failed: {0}")]
    Write(#[source] sea_orm::DbErr),

    /// A cover row exists for this identity but could not be read back.
    /// Covers are expected to always be well-formed when present, so this
    /// indicates store corruption rather than an expected absence.
    #[error("stored cover for '{path}' could not be read: {source}")]
    CorruptCover {
        path: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// The store handle has already been released via `close`.
    #[error("store is closed")]
    Closed,
}

/// Terminal failure for a single thumbnail request.
#[derive(Error, Debug)]
pub enum ThumbnailError {
    /// No loader is registered for the resource's media kind, the kind
    /// could not be determined, or every registered loader failed on it.
    #[error("not a supported resource: '{key}'")]
    UnsupportedResource { key: String },
}

/// Per-attempt loader failure.
///
/// Never surfaced to callers of the thumbnail service; a failed loader is
/// logged at debug severity and the next loader in the list is tried.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to decode source image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),

    #[error("thumbnail encoding failed: {0}")]
    Encode(#[source] image::ImageError),

    /// The loader cannot work with this shape of source at all (e.g. a
    /// cover-art loader handed a raw file path instead of extracted bytes).
    #[error("source not supported by this loader")]
    UnsupportedSource,
}
