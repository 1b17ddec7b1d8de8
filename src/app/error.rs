use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Document store error: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl ReaderError {
    pub fn network(url: &str, source: reqwest::Error) -> Self {
        ReaderError::Network {
            url: url.to_string(),
            source,
        }
    }

    /// Whether the session may report this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ReaderError::StorageUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;
