use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rusqlite_migration::{Migrations, M};

use crate::app::{ReaderError, Result};
use crate::domain::{Entry, FavouriteEntry, FavouriteTopic, SaveOutcome, Topic};
use crate::store::FavouriteStore;

const DAY_FORMAT: &str = "%Y-%m-%d";

const ENTRY_COLUMNS: &str = "topic_identifier, topic_title, fingerprint, body, author, \
                             created_at, created_on, saved_at";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|e| ReaderError::StorageUnavailable(e.to_string()))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            ReaderError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }

    fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<FavouriteEntry> {
        Ok(FavouriteEntry {
            topic_identifier: row.get(0)?,
            topic_title: row.get(1)?,
            fingerprint: row.get(2)?,
            body: row.get(3)?,
            author: row.get(4)?,
            created_at: row.get(5)?,
            created_on: row
                .get::<_, Option<String>>(6)?
                .and_then(|s| NaiveDate::parse_from_str(&s, DAY_FORMAT).ok()),
            saved_at: row
                .get::<_, String>(7)
                .ok()
                .and_then(|s| Self::parse_datetime(&s))
                .unwrap_or_else(Utc::now),
        })
    }

    fn query_entries<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<FavouriteEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let entries = stmt
            .query_map(params, Self::entry_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

impl FavouriteStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn save_topic(&self, topic: &Topic) -> Result<SaveOutcome> {
        let conn = self.conn()?;
        let favourite = FavouriteTopic::from_topic(topic);

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO favourite_topics (identifier, title, saved_at)
             VALUES (?1, ?2, ?3)",
            params![
                favourite.identifier,
                favourite.title,
                favourite.saved_at.to_rfc3339()
            ],
        )?;

        Ok(if inserted > 0 {
            SaveOutcome::Inserted
        } else {
            SaveOutcome::AlreadyExists
        })
    }

    fn list_topics(&self) -> Result<Vec<FavouriteTopic>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT identifier, title, saved_at FROM favourite_topics ORDER BY id",
        )?;

        let topics = stmt
            .query_map([], |row| {
                Ok(FavouriteTopic {
                    identifier: row.get(0)?,
                    title: row.get(1)?,
                    saved_at: row
                        .get::<_, String>(2)
                        .ok()
                        .and_then(|s| Self::parse_datetime(&s))
                        .unwrap_or_else(Utc::now),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(topics)
    }

    fn topic_exists(&self, identifier: &str) -> Result<bool> {
        let conn = self.conn()?;

        let found = conn
            .query_row(
                "SELECT 1 FROM favourite_topics WHERE identifier = ?1",
                params![identifier],
                |_| Ok(()),
            )
            .optional()?;

        Ok(found.is_some())
    }

    fn save_entry(&self, topic: &Topic, entry: &Entry) -> Result<SaveOutcome> {
        let conn = self.conn()?;
        let favourite = FavouriteEntry::new(topic, entry);

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO favourite_entries
             (topic_identifier, topic_title, fingerprint, body, author, created_at, created_on, saved_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                favourite.topic_identifier,
                favourite.topic_title,
                favourite.fingerprint,
                favourite.body,
                favourite.author,
                favourite.created_at,
                favourite.created_on.map(|d| d.format(DAY_FORMAT).to_string()),
                favourite.saved_at.to_rfc3339(),
            ],
        )?;

        Ok(if inserted > 0 {
            SaveOutcome::Inserted
        } else {
            SaveOutcome::AlreadyExists
        })
    }

    fn list_entries(&self, topic_identifier: &str) -> Result<Vec<FavouriteEntry>> {
        self.query_entries(
            &format!(
                "SELECT {ENTRY_COLUMNS} FROM favourite_entries
                 WHERE topic_identifier = ?1 ORDER BY id"
            ),
            params![topic_identifier],
        )
    }

    fn list_all_entries(&self) -> Result<Vec<FavouriteEntry>> {
        self.query_entries(
            &format!("SELECT {ENTRY_COLUMNS} FROM favourite_entries ORDER BY id DESC"),
            [],
        )
    }

    fn list_entries_on(&self, day: NaiveDate) -> Result<Vec<FavouriteEntry>> {
        self.query_entries(
            &format!(
                "SELECT {ENTRY_COLUMNS} FROM favourite_entries
                 WHERE created_on = ?1 ORDER BY id DESC"
            ),
            params![day.format(DAY_FORMAT).to_string()],
        )
    }

    fn entry_exists(&self, fingerprint: &str) -> Result<bool> {
        let conn = self.conn()?;

        let found = conn
            .query_row(
                "SELECT 1 FROM favourite_entries WHERE fingerprint = ?1",
                params![fingerprint],
                |_| Ok(()),
            )
            .optional()?;

        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic() -> Topic {
        Topic::new("rust programlama dili", "/rust--1", 12)
    }

    fn entry(id: &str, stamp: &str) -> Entry {
        Entry::new(Some(id.into()), format!("entry {}", id), "ssg", stamp)
    }

    #[test]
    fn test_save_topic_is_idempotent() {
        let store = SqliteStore::in_memory().unwrap();

        assert_eq!(store.save_topic(&topic()).unwrap(), SaveOutcome::Inserted);
        assert_eq!(store.save_topic(&topic()).unwrap(), SaveOutcome::AlreadyExists);

        let topics = store.list_topics().unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].identifier, "/rust--1");
        assert!(store.topic_exists("/rust--1").unwrap());
        assert!(!store.topic_exists("/go--2").unwrap());
    }

    #[test]
    fn test_save_entry_is_idempotent() {
        let store = SqliteStore::in_memory().unwrap();
        let e = entry("1", "18.10.2026 14:05");

        assert_eq!(store.save_entry(&topic(), &e).unwrap(), SaveOutcome::Inserted);
        assert_eq!(store.save_entry(&topic(), &e).unwrap(), SaveOutcome::AlreadyExists);

        let entries = store.list_entries("/rust--1").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].fingerprint, e.fingerprint());
        assert!(store.entry_exists(&e.fingerprint()).unwrap());
    }

    #[test]
    fn test_list_entries_scoped_by_topic() {
        let store = SqliteStore::in_memory().unwrap();
        let other = Topic::new("go", "/go--2", 0);

        store.save_entry(&topic(), &entry("1", "")).unwrap();
        store.save_entry(&other, &entry("2", "")).unwrap();
        store.save_entry(&topic(), &entry("3", "")).unwrap();

        let bodies: Vec<_> = store
            .list_entries("/rust--1")
            .unwrap()
            .into_iter()
            .map(|e| e.body)
            .collect();
        assert_eq!(bodies, vec!["entry 1", "entry 3"]);
        assert!(store.list_entries("/unknown").unwrap().is_empty());
    }

    #[test]
    fn test_list_all_newest_first() {
        let store = SqliteStore::in_memory().unwrap();
        store.save_entry(&topic(), &entry("1", "")).unwrap();
        store.save_entry(&topic(), &entry("2", "")).unwrap();

        let all = store.list_all_entries().unwrap();
        assert_eq!(all[0].body, "entry 2");
        assert_eq!(all[1].body, "entry 1");
    }

    #[test]
    fn test_list_entries_on_excludes_other_days() {
        let store = SqliteStore::in_memory().unwrap();
        store.save_entry(&topic(), &entry("1", "18.10.2026 14:05")).unwrap();
        store.save_entry(&topic(), &entry("2", "17.10.2026 23:59")).unwrap();
        store.save_entry(&topic(), &entry("3", "bilinmiyor")).unwrap();

        let day = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let on_day = store.list_entries_on(day).unwrap();
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].body, "entry 1");
        assert_eq!(on_day[0].created_on, Some(day));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favourites.db");

        {
            let store = SqliteStore::new(&path).unwrap();
            store.save_topic(&topic()).unwrap();
        }

        let store = SqliteStore::new(&path).unwrap();
        assert_eq!(store.list_topics().unwrap().len(), 1);
        assert_eq!(store.save_topic(&topic()).unwrap(), SaveOutcome::AlreadyExists);
    }
}
