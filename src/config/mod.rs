//! Configuration management for the reader.
//!
//! Configuration is read from `~/.config/eksi-reader/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keys;

pub use colors::{Theme, ThemeConfig};
pub use keys::MenuKeys;

use crate::extractor::SiteSelectors;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const STORAGE_ENV: &str = "EKSI_STORAGE";
pub const DATA_DIR_ENV: &str = "EKSI_DATA_DIR";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub menu: MenuConfig,
    pub storage: StorageConfig,
    pub theme: ThemeConfig,
    pub selectors: SiteSelectors,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Browser user agents; one is picked per request.
    pub user_agents: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://eksisozluk.com".to_string(),
            timeout_secs: 10,
            user_agents: vec![
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
                 Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
                 Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0"
                    .to_string(),
                "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0"
                    .to_string(),
            ],
        }
    }
}

impl SiteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Maximum items appended per fetched page; unlimited when unset.
    pub page_size: Option<usize>,
    #[serde(flatten)]
    pub keys: MenuKeys,
}

/// Which favourites backend to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// SQLite, falling back to the document store if it cannot be opened.
    #[default]
    Auto,
    Sqlite,
    Document,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "" => Ok(Backend::Auto),
            "sqlite" | "relational" => Ok(Backend::Sqlite),
            "document" | "json" => Ok(Backend::Document),
            other => Err(ConfigError::InvalidValue {
                key: STORAGE_ENV.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: Backend,
    /// Directory for the database files; the platform data dir when unset.
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Apply `EKSI_STORAGE` / `EKSI_DATA_DIR` over the file values.
    pub fn with_env(mut self) -> Result<Self, ConfigError> {
        self.apply_env(
            std::env::var(STORAGE_ENV).ok().as_deref(),
            std::env::var(DATA_DIR_ENV).ok().as_deref(),
        )?;
        Ok(self)
    }

    fn apply_env(&mut self, backend: Option<&str>, data_dir: Option<&str>) -> Result<(), ConfigError> {
        if let Some(backend) = backend {
            self.backend = backend.parse()?;
        }
        if let Some(dir) = data_dir.filter(|d| !d.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    pub fn resolve_data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|d| d.join("eksi-reader"))
                .ok_or(ConfigError::NoDataDir),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or the default path when `None`.
    ///
    /// If the default config file doesn't exist, creates one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            if path.is_some() {
                return Err(ConfigError::Io {
                    path: config_path,
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            if let Err(e) = Self::create_default_config(&config_path) {
                tracing::warn!("Could not write default config: {}", e);
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.menu.page_size == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "menu.page_size".to_string(),
                value: "0".to_string(),
            });
        }
        if self.menu.keys.exit.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "menu.exit".to_string(),
                value: format!("{:?}", self.menu.keys.exit),
            });
        }
        Ok(())
    }

    /// Get the default config file path: `~/.config/eksi-reader/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("eksi-reader").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# eksi-reader configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, DarkRed, Green, DarkGreen, Yellow, DarkYellow,
#   Blue, DarkBlue, Magenta, DarkMagenta, Cyan, DarkCyan, Grey, DarkGrey,
#   White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"

[site]
base_url = "https://eksisozluk.com"
# Request timeout in seconds
timeout_secs = 10

[menu]
# Leave the current menu
exit = ["q"]
# Load the next page ("" is a bare Enter)
more = ["m", ""]
# Maximum items taken from each fetched page
# page_size = 10

[storage]
# auto | sqlite | document (EKSI_STORAGE overrides this)
backend = "auto"
# data_dir = "/path/to/dir"

[theme]
# default | green
name = "default"

[theme.colors]
# author = "Cyan"
# timestamp = "#D75F00"

[selectors]
# CSS selectors used to read the site's pages
topic_container = "#content"
topic_link = "li > a"
entry_item = "#entry-item-list > li"
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.site.base_url, "https://eksisozluk.com");
        assert_eq!(config.menu.keys.exit, vec!["q"]);
        assert_eq!(config.menu.page_size, None);
        assert_eq!(config.storage.backend, Backend::Auto);
        assert_eq!(config.theme.name, "default");
        assert_eq!(config.selectors.entry_item, "#entry-item-list > li");
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[menu]
page_size = 5

[storage]
backend = "document"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.menu.page_size, Some(5));
        assert_eq!(config.menu.keys.more, vec!["m", ""]);
        assert_eq!(config.storage.backend, Backend::Document);
        assert_eq!(config.site.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.storage.backend, Backend::Auto);
        assert!(!config.site.user_agents.is_empty());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("SQLite".parse::<Backend>().unwrap(), Backend::Sqlite);
        assert_eq!("document".parse::<Backend>().unwrap(), Backend::Document);
        assert_eq!("".parse::<Backend>().unwrap(), Backend::Auto);
        assert!("mongo".parse::<Backend>().is_err());
    }

    #[test]
    fn test_env_overrides_storage() {
        let mut storage = StorageConfig::default();
        storage
            .apply_env(Some("document"), Some("/tmp/eksi"))
            .unwrap();
        assert_eq!(storage.backend, Backend::Document);
        assert_eq!(storage.resolve_data_dir().unwrap(), PathBuf::from("/tmp/eksi"));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[theme]\nname = \"green\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.theme.name, "green");
    }

    #[test]
    fn test_load_rejects_unusable_menu() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        fs::write(&path, "[menu]\npage_size = 0\n").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "menu.page_size"
        ));

        fs::write(&path, "[menu]\nexit = []\n").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "menu.exit"
        ));
    }
}
