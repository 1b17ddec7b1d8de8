use chrono::NaiveDate;
use url::Url;

use crate::app::Result;

/// Builds absolute page URLs from the configured site root.
#[derive(Debug, Clone)]
pub struct SiteUrls {
    base: Url,
}

impl SiteUrls {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base: Url::parse(base_url)?,
        })
    }

    pub fn base(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Page `page` of a channel's topic list.
    pub fn channel_page(&self, link: &str, page: u32) -> Result<String> {
        self.paged(link, &[], page)
    }

    /// Page `page` of a topic's entries.
    pub fn topic_page(&self, identifier: &str, page: u32) -> Result<String> {
        self.paged(identifier, &[], page)
    }

    /// Page `page` of the entries a topic received on `day`.
    pub fn topic_day_page(&self, identifier: &str, day: NaiveDate, page: u32) -> Result<String> {
        let day = day.format("%Y-%m-%d").to_string();
        self.paged(identifier, &[("day", &day)], page)
    }

    pub fn channel_index(&self) -> Result<String> {
        Ok(self.base.join("/kanallar")?.to_string())
    }

    pub fn author_page(&self, nickname: &str) -> Result<String> {
        let slug = nickname.trim().replace(' ', "-");
        Ok(self.base.join(&format!("/biri/{}", slug))?.to_string())
    }

    fn paged(&self, path: &str, params: &[(&str, &str)], page: u32) -> Result<String> {
        let mut url = self.base.join(path)?;
        url.set_query(None);
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("p", &page.to_string());
        }
        Ok(url.to_string())
    }
}
