use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::{ReaderError, Result};
use crate::domain::{Entry, FavouriteEntry, FavouriteTopic, SaveOutcome, Topic};
use crate::store::FavouriteStore;

/// On-disk layout of the document store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    topics: Vec<FavouriteTopic>,
    #[serde(default)]
    entries: Vec<FavouriteEntry>,
}

/// Favourites kept in a single JSON file.
///
/// The whole document is loaded on open and rewritten after every insert
/// through a temp file and a rename.
pub struct DocumentStore {
    path: PathBuf,
    doc: Mutex<Document>,
}

impl DocumentStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let doc = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Document::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Document::default(),
            Err(e) => return Err(e.into()),
        };

        let store = Self {
            path,
            doc: Mutex::new(doc),
        };
        // Fail at startup rather than on the first save.
        {
            let doc = store.doc()?;
            store.persist(&doc)?;
        }
        Ok(store)
    }

    fn doc(&self) -> Result<MutexGuard<'_, Document>> {
        self.doc
            .lock()
            .map_err(|e| ReaderError::StorageUnavailable(e.to_string()))
    }

    fn persist(&self, doc: &Document) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "Persisted favourites document");
        Ok(())
    }

    fn newest_first<'a>(entries: impl DoubleEndedIterator<Item = &'a FavouriteEntry>) -> Vec<FavouriteEntry> {
        entries.rev().cloned().collect()
    }
}

impl FavouriteStore for DocumentStore {
    fn backend_name(&self) -> &'static str {
        "document"
    }

    fn save_topic(&self, topic: &Topic) -> Result<SaveOutcome> {
        let mut doc = self.doc()?;
        if doc.topics.iter().any(|t| t.identifier == topic.identifier) {
            return Ok(SaveOutcome::AlreadyExists);
        }

        doc.topics.push(FavouriteTopic::from_topic(topic));
        if let Err(e) = self.persist(&doc) {
            doc.topics.pop();
            return Err(e);
        }
        Ok(SaveOutcome::Inserted)
    }

    fn list_topics(&self) -> Result<Vec<FavouriteTopic>> {
        Ok(self.doc()?.topics.clone())
    }

    fn topic_exists(&self, identifier: &str) -> Result<bool> {
        Ok(self.doc()?.topics.iter().any(|t| t.identifier == identifier))
    }

    fn save_entry(&self, topic: &Topic, entry: &Entry) -> Result<SaveOutcome> {
        let favourite = FavouriteEntry::new(topic, entry);
        let mut doc = self.doc()?;
        if doc.entries.iter().any(|e| e.fingerprint == favourite.fingerprint) {
            return Ok(SaveOutcome::AlreadyExists);
        }

        doc.entries.push(favourite);
        if let Err(e) = self.persist(&doc) {
            doc.entries.pop();
            return Err(e);
        }
        Ok(SaveOutcome::Inserted)
    }

    fn list_entries(&self, topic_identifier: &str) -> Result<Vec<FavouriteEntry>> {
        let doc = self.doc()?;
        Ok(doc
            .entries
            .iter()
            .filter(|e| e.topic_identifier == topic_identifier)
            .cloned()
            .collect())
    }

    fn list_all_entries(&self) -> Result<Vec<FavouriteEntry>> {
        let doc = self.doc()?;
        Ok(Self::newest_first(doc.entries.iter()))
    }

    fn list_entries_on(&self, day: NaiveDate) -> Result<Vec<FavouriteEntry>> {
        let doc = self.doc()?;
        Ok(Self::newest_first(
            doc.entries.iter().filter(|e| e.created_on == Some(day)),
        ))
    }

    fn entry_exists(&self, fingerprint: &str) -> Result<bool> {
        Ok(self.doc()?.entries.iter().any(|e| e.fingerprint == fingerprint))
    }
}
