use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const STAMP_FORMAT: &str = "%d.%m.%Y %H:%M";
const DAY_FORMAT: &str = "%d.%m.%Y";

/// A single post within a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Site-assigned id (`data-id`), when the page exposes one.
    pub id: Option<String>,
    pub body: String,
    pub author: String,
    /// Raw timestamp text as served, e.g. `18.10.2026 14:05 ~ 14:30`.
    pub created_at: String,
    /// Set at render time when the entry is already in the favourites store.
    #[serde(skip)]
    pub favourite: bool,
}

impl Entry {
    pub fn new(
        id: Option<String>,
        body: impl Into<String>,
        author: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id,
            body: body.into(),
            author: author.into(),
            created_at: created_at.into(),
            favourite: false,
        }
    }

    /// Stable dedup key for the favourites store.
    ///
    /// Uses the site id when present, otherwise body, author and timestamp.
    pub fn fingerprint(&self) -> String {
        Self::generate_fingerprint(self.id.as_deref(), &self.body, &self.author, &self.created_at)
    }

    pub fn generate_fingerprint(
        id: Option<&str>,
        body: &str,
        author: &str,
        created_at: &str,
    ) -> String {
        let mut hasher = Sha256::new();
        match id.filter(|id| !id.is_empty()) {
            Some(id) => {
                hasher.update(b"id\0");
                hasher.update(id.as_bytes());
            }
            None => {
                hasher.update(body.as_bytes());
                hasher.update(b"\0");
                hasher.update(author.as_bytes());
                hasher.update(b"\0");
                hasher.update(created_at.as_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }

    /// Creation time parsed from the leading part of the site stamp.
    pub fn posted_at(&self) -> Option<NaiveDateTime> {
        parse_stamp(&self.created_at)
    }

    pub fn posted_on(&self) -> Option<NaiveDate> {
        parse_stamp_date(&self.created_at)
    }

    pub fn is_edited(&self) -> bool {
        self.created_at.contains('~')
    }
}

/// Parse `dd.mm.yyyy HH:MM` (optionally followed by `~ edit time`).
pub fn parse_stamp(stamp: &str) -> Option<NaiveDateTime> {
    let created = stamp.split('~').next()?.trim();

    NaiveDateTime::parse_from_str(created, STAMP_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(created, DAY_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

pub fn parse_stamp_date(stamp: &str) -> Option<NaiveDate> {
    parse_stamp(stamp).map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: Option<&str>) -> Entry {
        Entry::new(id.map(String::from), "body", "author", "18.10.2026 14:05")
    }

    #[test]
    fn test_fingerprint_deterministic() {
        assert_eq!(entry(Some("42")).fingerprint(), entry(Some("42")).fingerprint());
        assert_eq!(entry(None).fingerprint(), entry(None).fingerprint());
    }

    #[test]
    fn test_fingerprint_prefers_site_id() {
        let mut a = entry(Some("42"));
        let b = entry(Some("42"));
        a.body = "edited body".into();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(entry(Some("42")).fingerprint(), entry(Some("43")).fingerprint());
    }

    #[test]
    fn test_fingerprint_without_id_uses_content() {
        let mut a = entry(None);
        let b = entry(None);
        a.author = "someone else".into();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let fp = entry(None).fingerprint();
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_empty_id_falls_back_to_content() {
        assert_eq!(entry(Some("")).fingerprint(), entry(None).fingerprint());
    }

    #[test]
    fn test_parse_plain_stamp() {
        let e = entry(None);
        let posted = e.posted_at().unwrap();
        assert_eq!(posted.format("%Y-%m-%d %H:%M").to_string(), "2026-10-18 14:05");
        assert!(!e.is_edited());
    }

    #[test]
    fn test_parse_edited_stamp() {
        let e = Entry::new(None, "b", "a", "01.02.2024 09:10 ~ 10:00");
        assert!(e.is_edited());
        assert_eq!(e.posted_on(), NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn test_parse_day_only_stamp() {
        assert_eq!(
            parse_stamp_date("05.06.2020"),
            NaiveDate::from_ymd_opt(2020, 6, 5)
        );
    }

    #[test]
    fn test_parse_garbage_stamp() {
        assert_eq!(parse_stamp("dün akşam"), None);
        assert_eq!(parse_stamp(""), None);
    }
}
