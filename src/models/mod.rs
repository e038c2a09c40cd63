//! Domain model types shared across the store and thumbnail services.

use std::io;
use std::ops::BitOr;
use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a file's current content: path, size and last-write time.
///
/// Two identities are equal iff all three fields match. This is the sole
/// proxy for "the content has not changed". It is not a content hash, so a
/// file rewritten with identical size and timestamp is indistinguishable
/// from the original. That limitation is accepted; the store never attempts
/// to detect it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub path: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

impl Identity {
    pub fn new(path: impl Into<String>, size: u64, modified: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            size,
            modified,
        }
    }

    /// Build an identity from filesystem metadata (size + last-write time).
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let modified = metadata.modified()?;
        Ok(Self {
            path: path.to_string_lossy().into_owned(),
            size: metadata.len(),
            modified: DateTime::<Utc>::from(modified),
        })
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} bytes @ {})", self.path, self.size, self.modified)
    }
}

/// A descriptor record revived from the persistent store.
///
/// The payload is whatever the scanning collaborator serialized when the
/// file was first analyzed; this crate never interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFileRecord {
    pub identity: Identity,
    pub descriptor: serde_json::Value,
}

/// A file record the scanning collaborator wants persisted.
///
/// `serialized_descriptor` returning `None` marks the record as
/// non-persistable; the store treats such a `put` as a silent no-op rather
/// than an error, so callers can hand over every record they produce.
pub trait FileRecord: Send + Sync {
    fn identity(&self) -> &Identity;

    /// Opaque descriptor payload, or `None` if this record cannot be
    /// serialized.
    fn serialized_descriptor(&self) -> Option<serde_json::Value>;

    /// Decoded cover-art bytes, if the file carries any.
    fn cover(&self) -> Option<Bytes>;
}

/// A rendered thumbnail: actual output dimensions plus encoded image bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub data: Bytes,
}

/// Coarse media classification used to select thumbnail loaders.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

impl MediaKind {
    /// Classify a file by extension. Returns `None` for extensions no
    /// loader family claims.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" | "tif" | "tiff" => Some(Self::Image),
            "mp3" | "flac" | "ogg" | "oga" | "m4a" | "m4b" | "aac" | "wav" | "wma" => {
                Some(Self::Audio)
            }
            "mkv" | "mp4" | "m4v" | "avi" | "webm" | "mov" | "ts" | "mpg" | "mpeg" | "wmv" => {
                Some(Self::Video)
            }
            _ => None,
        }
    }
}

/// Bit-set of [`MediaKind`] values.
///
/// Loaders declare the set of media kinds they can thumbnail; one loader may
/// claim several kinds at once (`MediaKinds::AUDIO | MediaKinds::VIDEO`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MediaKinds(u8);

impl MediaKinds {
    pub const NONE: MediaKinds = MediaKinds(0);
    pub const IMAGE: MediaKinds = MediaKinds(1 << 0);
    pub const AUDIO: MediaKinds = MediaKinds(1 << 1);
    pub const VIDEO: MediaKinds = MediaKinds(1 << 2);

    pub fn contains(self, kind: MediaKind) -> bool {
        self.0 & MediaKinds::from(kind).0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<MediaKind> for MediaKinds {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Image => MediaKinds::IMAGE,
            MediaKind::Audio => MediaKinds::AUDIO,
            MediaKind::Video => MediaKinds::VIDEO,
        }
    }
}

impl BitOr for MediaKinds {
    type Output = MediaKinds;

    fn bitor(self, rhs: MediaKinds) -> MediaKinds {
        MediaKinds(self.0 | rhs.0)
    }
}

impl BitOr<MediaKind> for MediaKinds {
    type Output = MediaKinds;

    fn bitor(self, rhs: MediaKind) -> MediaKinds {
        self | MediaKinds::from(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn identity_at(secs: i64) -> Identity {
        Identity::new("/media/a.mp3", 100, Utc.timestamp_opt(secs, 0).unwrap())
    }

    #[test]
    fn identity_equality_requires_all_three_fields() {
        assert_eq!(identity_at(1_700_000_000), identity_at(1_700_000_000));
        assert_ne!(identity_at(1_700_000_000), identity_at(1_700_000_001));

        let base = identity_at(1_700_000_000);
        let mut other = base.clone();
        other.size = 101;
        assert_ne!(base, other);

        let mut other = base.clone();
        other.path = "/media/b.mp3".to_string();
        assert_ne!(base, other);
    }

    #[test]
    fn media_kind_classifies_by_extension() {
        assert_eq!(
            MediaKind::from_path(&PathBuf::from("cover.JPG")),
            Some(MediaKind::Image)
        );
        assert_eq!(
            MediaKind::from_path(&PathBuf::from("song.flac")),
            Some(MediaKind::Audio)
        );
        assert_eq!(
            MediaKind::from_path(&PathBuf::from("movie.mkv")),
            Some(MediaKind::Video)
        );
        assert_eq!(MediaKind::from_path(&PathBuf::from("notes.txt")), None);
        assert_eq!(MediaKind::from_path(&PathBuf::from("no-extension")), None);
    }

    #[test]
    fn media_kinds_bitset_combines_and_contains() {
        let set = MediaKinds::AUDIO | MediaKinds::VIDEO;
        assert!(set.contains(MediaKind::Audio));
        assert!(set.contains(MediaKind::Video));
        assert!(!set.contains(MediaKind::Image));
        assert!(MediaKinds::NONE.is_empty());
        assert!(!set.is_empty());

        let set = MediaKinds::IMAGE | MediaKind::Audio;
        assert!(set.contains(MediaKind::Image));
        assert!(set.contains(MediaKind::Audio));
    }
}
