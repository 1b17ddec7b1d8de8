use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Entry, Topic};

/// Result of a favourites write; a duplicate is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavouriteTopic {
    pub identifier: String,
    pub title: String,
    pub saved_at: DateTime<Utc>,
}

impl FavouriteTopic {
    pub fn from_topic(topic: &Topic) -> Self {
        Self {
            identifier: topic.identifier.clone(),
            title: topic.title.clone(),
            saved_at: Utc::now(),
        }
    }

    pub fn to_topic(&self) -> Topic {
        Topic::new(self.title.clone(), self.identifier.clone(), 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavouriteEntry {
    pub topic_identifier: String,
    pub topic_title: String,
    pub fingerprint: String,
    pub body: String,
    pub author: String,
    /// Raw site timestamp of the entry.
    pub created_at: String,
    /// Calendar day parsed from `created_at`; the filter key for "today".
    pub created_on: Option<NaiveDate>,
    pub saved_at: DateTime<Utc>,
}

impl FavouriteEntry {
    pub fn new(topic: &Topic, entry: &Entry) -> Self {
        Self {
            topic_identifier: topic.identifier.clone(),
            topic_title: topic.title.clone(),
            fingerprint: entry.fingerprint(),
            body: entry.body.clone(),
            author: entry.author.clone(),
            created_at: entry.created_at.clone(),
            created_on: entry.posted_on(),
            saved_at: Utc::now(),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favourite_entry_keeps_topic_and_day() {
        let topic = Topic::new("rust", "/rust--1", 3);
        let entry = Entry::new(Some("9".into()), "body", "author", "18.10.2026 14:05");
        let fav = FavouriteEntry::new(&topic, &entry);

        assert_eq!(fav.topic_identifier, "/rust--1");
        assert_eq!(fav.fingerprint, entry.fingerprint());
        assert_eq!(fav.created_on, NaiveDate::from_ymd_opt(2026, 10, 18));
    }
}
