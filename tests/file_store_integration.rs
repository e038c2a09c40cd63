//! Integration tests for the identity-keyed persistent store, run against a
//! real SQLite database file.

use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use media_thumbs::config::DatabaseConfig;
use media_thumbs::errors::StoreError;
use media_thumbs::models::{FileRecord, Identity};
use media_thumbs::services::FileStore;
use serde_json::json;
use tempfile::TempDir;

/// Stand-in for the scanning collaborator's analyzed-file records.
struct ScannedFile {
    identity: Identity,
    descriptor: Option<serde_json::Value>,
    cover: Option<Bytes>,
}

impl FileRecord for ScannedFile {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn serialized_descriptor(&self) -> Option<serde_json::Value> {
        self.descriptor.clone()
    }

    fn cover(&self) -> Option<Bytes> {
        self.cover.clone()
    }
}

fn modified_at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn scanned(path: &str, size: u64, secs: i64) -> ScannedFile {
    ScannedFile {
        identity: Identity::new(path, size, modified_at(secs)),
        descriptor: Some(json!({ "title": "Example", "duration": 184 })),
        cover: Some(Bytes::from_static(b"cover-bytes")),
    }
}

async fn open_store(dir: &TempDir) -> FileStore {
    let config = DatabaseConfig {
        url: format!("sqlite://{}/store.db", dir.path().display()),
        max_connections: Some(1),
    };
    FileStore::open(&config).await.unwrap()
}

#[tokio::test]
async fn descriptor_and_cover_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let record = scanned("/media/music/song.mp3", 4_321, 1_700_000_000);
    store.put(&record).await.unwrap();

    let revived = store
        .get_file_descriptor(&record.identity)
        .await
        .expect("descriptor should be stored");
    assert_eq!(revived.identity, record.identity);
    assert_eq!(revived.descriptor["title"], "Example");
    assert_eq!(revived.descriptor["duration"], 184);

    assert!(store.has_cover(&record.identity).await);
    let cover = store.get_cover(&record.identity).await.unwrap();
    assert_eq!(cover, Some(Bytes::from_static(b"cover-bytes")));

    store.close().await;
}

#[tokio::test]
async fn identity_mismatch_on_any_field_is_a_miss() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let record = scanned("/media/music/song.mp3", 100, 1_700_000_000);
    store.put(&record).await.unwrap();

    // Same path and size, different last-write time.
    let touched = Identity::new("/media/music/song.mp3", 100, modified_at(1_700_000_001));
    assert!(store.get_file_descriptor(&touched).await.is_none());
    assert!(!store.has_cover(&touched).await);

    // Same path and time, different size.
    let rewritten = Identity::new("/media/music/song.mp3", 101, modified_at(1_700_000_000));
    assert!(store.get_file_descriptor(&rewritten).await.is_none());

    // The original identity still hits.
    assert!(store.get_file_descriptor(&record.identity).await.is_some());

    store.close().await;
}

#[tokio::test]
async fn non_persistable_records_are_silently_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let record = ScannedFile {
        identity: Identity::new("/media/live-stream", 0, modified_at(1_700_000_000)),
        descriptor: None,
        cover: Some(Bytes::from_static(b"ignored")),
    };

    // Not an error, and neither table gains a row.
    store.put(&record).await.unwrap();
    assert!(store.get_file_descriptor(&record.identity).await.is_none());
    assert!(!store.has_cover(&record.identity).await);

    store.close().await;
}

#[tokio::test]
async fn analyzed_files_without_cover_art_remember_the_absence() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let record = ScannedFile {
        identity: Identity::new("/media/music/plain.mp3", 900, modified_at(1_700_000_000)),
        descriptor: Some(json!({ "title": "No Art" })),
        cover: None,
    };
    store.put(&record).await.unwrap();

    // The cover row exists (the absence was recorded) but carries no bytes.
    assert!(store.has_cover(&record.identity).await);
    assert_eq!(store.get_cover(&record.identity).await.unwrap(), None);

    store.close().await;
}

#[tokio::test]
async fn closed_store_reads_miss_and_writes_fail() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let record = scanned("/media/music/song.mp3", 4_321, 1_700_000_000);
    store.put(&record).await.unwrap();
    store.close().await;

    assert!(store.get_file_descriptor(&record.identity).await.is_none());
    assert!(!store.has_cover(&record.identity).await);
    assert_eq!(store.get_cover(&record.identity).await.unwrap(), None);
    assert!(matches!(
        store.put(&record).await,
        Err(StoreError::Closed)
    ));

    // Closing twice is harmless.
    store.close().await;
}

#[tokio::test]
async fn open_creates_the_database_file_and_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite://{}/nested/cache/store.db", dir.path().display()),
        max_connections: Some(1),
    };

    let store = FileStore::open(&config).await.unwrap();
    assert!(dir.path().join("nested/cache/store.db").exists());
    store.close().await;
}

#[tokio::test]
async fn entries_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();

    let store = open_store(&dir).await;
    let record = scanned("/media/video/movie.mkv", 1_000_000, 1_700_000_000);
    store.put(&record).await.unwrap();
    store.close().await;

    let reopened = open_store(&dir).await;
    let revived = reopened
        .get_file_descriptor(&record.identity)
        .await
        .expect("descriptor should survive a restart");
    assert_eq!(revived.descriptor["title"], "Example");
    assert!(reopened.has_cover(&record.identity).await);
    reopened.close().await;
}
