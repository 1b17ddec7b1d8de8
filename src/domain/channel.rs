use serde::{Deserialize, Serialize};

/// Channels the site serves but does not list on its channel index page.
pub const UNLISTED_CHANNELS: [&str; 5] = [
    "/basliklar/gundem",
    "/debe",
    "/basliklar/sorunsal",
    "/basliklar/basiboslar",
    "/basliklar/tarihte-bugun",
];

pub const DEFAULT_CHANNEL: &str = "/basliklar/gundem";

/// A named feed of topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub link: String,
}

impl Channel {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }

    /// Build a channel whose name is the last path segment of its link.
    pub fn from_link(link: &str) -> Self {
        let name = link.rsplit('/').next().unwrap_or(link);
        Self::new(name, link)
    }

    pub fn default_channel() -> Self {
        Self::from_link(DEFAULT_CHANNEL)
    }

    pub fn unlisted() -> Vec<Channel> {
        UNLISTED_CHANNELS.iter().map(|l| Self::from_link(l)).collect()
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_link() {
        assert_eq!(Channel::from_link("/basliklar/gundem").name, "gundem");
        assert_eq!(Channel::from_link("/debe").name, "debe");
    }

    #[test]
    fn test_unlisted_starts_with_default() {
        let channels = Channel::unlisted();
        assert_eq!(channels.len(), 5);
        assert_eq!(channels[0], Channel::default_channel());
    }
}
