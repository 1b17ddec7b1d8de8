use serde::{Deserialize, Serialize};

/// CSS selectors describing the site's markup.
///
/// Kept in the config file so markup drift can be patched without a rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    /// Container of a topic list page.
    pub topic_container: String,
    /// Topic links inside the container.
    pub topic_link: String,
    /// Count badge inside a topic link.
    pub topic_count: String,
    /// Element whose text starts with the channel's total topic count.
    pub topic_total: String,

    /// One entry block of an entry list page.
    pub entry_item: String,
    pub entry_content: String,
    pub entry_date: String,
    /// Element carrying the page count of a topic.
    pub pager: String,
    pub pager_attr: String,

    pub channel_container: String,
    pub channel_link: String,

    /// One topic block on an author's profile page.
    pub author_item: String,
    pub author_item_title: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            topic_container: "#content".to_string(),
            topic_link: "li > a".to_string(),
            topic_count: "small".to_string(),
            topic_total: ".topic-list-description".to_string(),
            entry_item: "#entry-item-list > li".to_string(),
            entry_content: ".content".to_string(),
            entry_date: ".entry-date".to_string(),
            pager: ".pager".to_string(),
            pager_attr: "data-pagecount".to_string(),
            channel_container: "#channel-follow-list".to_string(),
            channel_link: ".index-link".to_string(),
            author_item: ".topic-item".to_string(),
            author_item_title: "#title".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let selectors: SiteSelectors = toml::from_str(r##"entry_item = "article""##).unwrap();
        assert_eq!(selectors.entry_item, "article");
        assert_eq!(selectors.topic_container, "#content");
    }
}
