pub mod document;
pub mod sqlite;

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::app::{ReaderError, Result};
use crate::config::{Backend, StorageConfig};
use crate::domain::{Entry, FavouriteEntry, FavouriteTopic, SaveOutcome, Topic};

pub use document::DocumentStore;
pub use sqlite::SqliteStore;

pub const SQLITE_FILE: &str = "favourites.db";
pub const DOCUMENT_FILE: &str = "favourites.json";

/// Persistence of favourite topics and entries.
///
/// Saves are deduplicated on the topic identifier and the entry
/// fingerprint. Writes are visible to the next read.
pub trait FavouriteStore {
    fn backend_name(&self) -> &'static str;

    // Topic operations
    fn save_topic(&self, topic: &Topic) -> Result<SaveOutcome>;
    fn list_topics(&self) -> Result<Vec<FavouriteTopic>>;
    fn topic_exists(&self, identifier: &str) -> Result<bool>;

    // Entry operations
    fn save_entry(&self, topic: &Topic, entry: &Entry) -> Result<SaveOutcome>;
    /// Entries saved for one topic, in save order.
    fn list_entries(&self, topic_identifier: &str) -> Result<Vec<FavouriteEntry>>;
    /// Every saved entry, most recently saved first.
    fn list_all_entries(&self) -> Result<Vec<FavouriteEntry>>;
    /// Saved entries whose creation day is `day`, most recently saved first.
    fn list_entries_on(&self, day: NaiveDate) -> Result<Vec<FavouriteEntry>>;
    fn entry_exists(&self, fingerprint: &str) -> Result<bool>;

    /// Saved entries written on the current local calendar day.
    fn list_entries_today(&self) -> Result<Vec<FavouriteEntry>> {
        self.list_entries_on(Local::now().date_naive())
    }
}

/// Open the configured backend once, at startup.
///
/// `Auto` prefers SQLite and falls back to the document store. Failure of
/// the chosen backend(s) is [`ReaderError::StorageUnavailable`].
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn FavouriteStore>> {
    let dir = config
        .resolve_data_dir()
        .map_err(|e| ReaderError::StorageUnavailable(e.to_string()))?;

    let store: Box<dyn FavouriteStore> = match config.backend {
        Backend::Sqlite => Box::new(open_sqlite(&dir).map_err(unavailable)?),
        Backend::Document => Box::new(open_document(&dir).map_err(unavailable)?),
        Backend::Auto => match open_sqlite(&dir) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!("SQLite store unavailable ({}), using document store", e);
                Box::new(open_document(&dir).map_err(unavailable)?)
            }
        },
    };

    tracing::info!("Favourites stored with {} backend in {}", store.backend_name(), dir.display());
    Ok(store)
}

fn open_sqlite(dir: &Path) -> Result<SqliteStore> {
    fs::create_dir_all(dir)?;
    SqliteStore::new(dir.join(SQLITE_FILE))
}

fn open_document(dir: &Path) -> Result<DocumentStore> {
    fs::create_dir_all(dir)?;
    DocumentStore::open(dir.join(DOCUMENT_FILE))
}

fn unavailable(e: ReaderError) -> ReaderError {
    match e {
        ReaderError::StorageUnavailable(_) => e,
        other => ReaderError::StorageUnavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(backend: Backend, dir: PathBuf) -> StorageConfig {
        StorageConfig {
            backend,
            data_dir: Some(dir),
        }
    }

    #[test]
    fn test_auto_prefers_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&config(Backend::Auto, dir.path().to_path_buf())).unwrap();
        assert_eq!(store.backend_name(), "sqlite");
        assert!(dir.path().join(SQLITE_FILE).exists());
    }

    #[test]
    fn test_explicit_document_backend() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&config(Backend::Document, dir.path().join("nested"))).unwrap();
        assert_eq!(store.backend_name(), "document");
    }

    #[test]
    fn test_auto_falls_back_to_document() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the database file should be makes SQLite fail.
        fs::create_dir_all(dir.path().join(SQLITE_FILE)).unwrap();

        let store = open_store(&config(Backend::Auto, dir.path().to_path_buf())).unwrap();
        assert_eq!(store.backend_name(), "document");
    }

    #[test]
    fn test_unusable_dir_is_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();

        let result = open_store(&config(Backend::Auto, file));
        assert!(matches!(result, Err(ReaderError::StorageUnavailable(_))));
    }

    #[test]
    fn test_today_uses_local_date() {
        let store = SqliteStore::in_memory().unwrap();
        let topic = Topic::new("t", "/t--1", 0);
        let today = Local::now().date_naive().format("%d.%m.%Y 12:00").to_string();
        store
            .save_entry(&topic, &Entry::new(Some("1".into()), "b", "a", today))
            .unwrap();

        assert_eq!(store.list_entries_today().unwrap().len(), 1);
    }
}
