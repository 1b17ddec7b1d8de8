//! Pure extraction of topics, entries and channels from the site's HTML.
//!
//! Nothing here does I/O. When the expected markup is missing the
//! extractors return empty results; a page that does not match is a page
//! with no items.

mod selectors;

pub use selectors::SiteSelectors;

use scraper::{ElementRef, Html, Node, Selector};

use crate::domain::{Channel, Entry, Topic};

/// One parsed topic list page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicPage {
    pub topics: Vec<Topic>,
    /// Total topics in the channel, when the page states it.
    pub total: Option<usize>,
}

/// One parsed entry list page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPage {
    pub entries: Vec<Entry>,
    pub page_count: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Extractor {
    selectors: SiteSelectors,
    base_url: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(SiteSelectors::default(), "https://eksisozluk.com")
    }
}

impl Extractor {
    pub fn new(selectors: SiteSelectors, base_url: &str) -> Self {
        Self {
            selectors,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn topic_page(&self, markup: &str) -> TopicPage {
        let doc = Html::parse_document(markup);
        TopicPage {
            topics: self.topics_in(&doc),
            total: self.topic_total_in(&doc),
        }
    }

    pub fn entry_page(&self, markup: &str) -> EntryPage {
        let doc = Html::parse_document(markup);
        EntryPage {
            entries: self.entries_in(&doc),
            page_count: self.page_count_in(&doc),
        }
    }

    /// Topics in ranking order.
    pub fn extract_topics(&self, markup: &str) -> Vec<Topic> {
        self.topics_in(&Html::parse_document(markup))
    }

    pub fn extract_topic_total(&self, markup: &str) -> Option<usize> {
        self.topic_total_in(&Html::parse_document(markup))
    }

    /// Entries in the order the page serves them.
    pub fn extract_entries(&self, markup: &str) -> Vec<Entry> {
        self.entries_in(&Html::parse_document(markup))
    }

    pub fn extract_page_count(&self, markup: &str) -> Option<u32> {
        self.page_count_in(&Html::parse_document(markup))
    }

    pub fn extract_channels(&self, markup: &str) -> Vec<Channel> {
        let doc = Html::parse_document(markup);
        let Some(container) = first(&doc, &self.selectors.channel_container) else {
            return Vec::new();
        };

        select_in(container, &self.selectors.channel_link)
            .into_iter()
            .filter_map(|link| {
                let href = link.value().attr("href")?;
                let name = element_text(link);
                let name = name.trim_start_matches('#').trim();
                (!name.is_empty()).then(|| Channel::new(name, href))
            })
            .collect()
    }

    /// Latest entries on an author's profile, paired with their topic title.
    pub fn extract_author_entries(&self, markup: &str, author: &str) -> Vec<(String, Entry)> {
        let doc = Html::parse_document(markup);

        select_doc(&doc, &self.selectors.author_item)
            .into_iter()
            .filter_map(|item| {
                let title = select_in(item, &self.selectors.author_item_title)
                    .into_iter()
                    .next()
                    .map(|t| {
                        t.value()
                            .attr("data-title")
                            .map(str::to_string)
                            .unwrap_or_else(|| element_text(t))
                    })
                    .unwrap_or_default();

                let content = select_in(item, &self.selectors.entry_content)
                    .into_iter()
                    .next()?;
                let created_at = select_in(item, &self.selectors.entry_date)
                    .into_iter()
                    .next()
                    .map(element_text)
                    .unwrap_or_default();
                let id = select_in(item, "li[data-id]")
                    .into_iter()
                    .next()
                    .and_then(|li| li.value().attr("data-id"))
                    .map(str::to_string);

                let body = self.render_body(content);
                Some((title, Entry::new(id, body, author, created_at)))
            })
            .collect()
    }

    fn topics_in(&self, doc: &Html) -> Vec<Topic> {
        let Some(container) = first(doc, &self.selectors.topic_container) else {
            return Vec::new();
        };
        let count_selector = Selector::parse(&self.selectors.topic_count).ok();

        select_in(container, &self.selectors.topic_link)
            .into_iter()
            .filter_map(|link| {
                let href = link.value().attr("href")?;
                let identifier = href.split('?').next().unwrap_or(href).to_string();

                let mut title = String::new();
                let mut count = None;
                for child in link.children() {
                    match child.value() {
                        Node::Text(text) => title.push_str(text),
                        Node::Element(_) => {
                            let Some(el) = ElementRef::wrap(child) else {
                                continue;
                            };
                            let is_count = count_selector
                                .as_ref()
                                .is_some_and(|sel| sel.matches(&el));
                            if is_count {
                                count = Some(Topic::parse_entry_count(&element_text(el)));
                            } else {
                                title.push_str(&el.text().collect::<String>());
                            }
                        }
                        _ => {}
                    }
                }

                let title = title.trim();
                if title.is_empty() {
                    return None;
                }
                Some(Topic::new(title, identifier, count.unwrap_or(0)))
            })
            .collect()
    }

    fn topic_total_in(&self, doc: &Html) -> Option<usize> {
        let description = first(doc, &self.selectors.topic_total)?;
        element_text(description)
            .split_whitespace()
            .next()?
            .replace(['.', ','], "")
            .parse()
            .ok()
    }

    fn entries_in(&self, doc: &Html) -> Vec<Entry> {
        select_doc(doc, &self.selectors.entry_item)
            .into_iter()
            .filter_map(|item| {
                let content = select_in(item, &self.selectors.entry_content)
                    .into_iter()
                    .next()?;
                let attrs = item.value();

                let id = attrs.attr("data-id").map(str::to_string);
                let author = attrs
                    .attr("data-author")
                    .map(str::to_string)
                    .or_else(|| {
                        select_in(item, ".entry-author")
                            .into_iter()
                            .next()
                            .map(element_text)
                    })
                    .unwrap_or_default();
                let created_at = select_in(item, &self.selectors.entry_date)
                    .into_iter()
                    .next()
                    .map(element_text)
                    .unwrap_or_default();

                Some(Entry::new(id, self.render_body(content), author, created_at))
            })
            .collect()
    }

    fn page_count_in(&self, doc: &Html) -> Option<u32> {
        first(doc, &self.selectors.pager)?
            .value()
            .attr(&self.selectors.pager_attr)?
            .trim()
            .parse()
            .ok()
    }

    /// Flatten an entry body to text: `<br>` becomes a newline and links
    /// keep their target next to the link text.
    fn render_body(&self, content: ElementRef<'_>) -> String {
        let mut out = String::new();
        self.render_children(content, &mut out);
        out.trim().to_string()
    }

    fn render_children(&self, element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => out.push_str(text.trim()),
                Node::Element(el) => {
                    let Some(child_ref) = ElementRef::wrap(child) else {
                        continue;
                    };
                    match el.name() {
                        "br" => out.push('\n'),
                        "a" => out.push_str(&self.render_link(child_ref)),
                        _ => self.render_children(child_ref, out),
                    }
                }
                _ => {}
            }
        }
    }

    fn render_link(&self, link: ElementRef<'_>) -> String {
        let text = element_text(link);
        let href = link.value().attr("href").unwrap_or_default();

        if text.contains("spoiler") || text.contains("http") || href.is_empty() {
            format!(" {} ", text)
        } else if href.contains("http") {
            format!(" {} ({}) ", text, href)
        } else {
            format!(" {} ({}{}) ", text, self.base_url, href)
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    doc.select(&selector).next()
}

fn select_doc<'a>(doc: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => doc.select(&selector).collect(),
        Err(_) => {
            tracing::warn!("Invalid selector: {}", css);
            Vec::new()
        }
    }
}

fn select_in<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => scope.select(&selector).collect(),
        Err(_) => {
            tracing::warn!("Invalid selector: {}", css);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPIC_PAGE: &str = r#"<html><body>
<div id="content">
  <p class="topic-list-description">123 başlık</p>
  <ul class="topic-list partial">
    <li><a href="/rust-programlama-dili--5512345?a=popular">rust programlama dili <small>57</small></a></li>
    <li><a href="/bugun-yapilan-en-iyi-sey--1?a=popular">bugün yapılan en iyi şey <small>1,2b</small></a></li>
    <li><a href="/sessiz-baslik--2">sessiz başlık</a></li>
  </ul>
</div>
</body></html>"#;

    const ENTRY_PAGE: &str = r#"<html><body>
<div class="pager" data-currentpage="1" data-pagecount="4"></div>
<ul id="entry-item-list">
  <li data-id="100" data-author="ssg" data-author-id="1">
    <div class="content">ilk entry<br/>ikinci satır</div>
    <footer><a class="entry-date permalink" href="/entry/100">18.10.2026 14:05</a></footer>
  </li>
  <li data-id="101" data-author="başkası" data-author-id="2">
    <div class="content">bkz: <a class="b" href="/?q=rust">rust</a> ve <a href="https://www.rust-lang.org">site</a></div>
    <footer><a class="entry-date permalink" href="/entry/101">17.10.2026 09:00 ~ 09:30</a></footer>
  </li>
</ul>
</body></html>"#;

    fn extractor() -> Extractor {
        Extractor::default()
    }

    #[test]
    fn test_extract_topics_in_order() {
        let topics = extractor().extract_topics(TOPIC_PAGE);

        assert_eq!(topics.len(), 3);
        assert_eq!(topics[0].title, "rust programlama dili");
        assert_eq!(topics[0].identifier, "/rust-programlama-dili--5512345");
        assert_eq!(topics[0].entry_count, 57);
        assert_eq!(topics[1].entry_count, 1200);
        assert_eq!(topics[2].title, "sessiz başlık");
        assert_eq!(topics[2].entry_count, 0);
    }

    #[test]
    fn test_extract_topics_ignores_whitespace_and_comments() {
        let noisy = TOPIC_PAGE
            .replace("<li>", "\n\n   <!-- ad slot -->\n  <li>")
            .replace("</li>", "</li>\n\t\t<!-- end -->\n");
        let topics = extractor().extract_topics(&noisy);

        assert_eq!(topics, extractor().extract_topics(TOPIC_PAGE));
    }

    #[test]
    fn test_extract_topics_restartable() {
        let ex = extractor();
        assert_eq!(ex.extract_topics(TOPIC_PAGE), ex.extract_topics(TOPIC_PAGE));
    }

    #[test]
    fn test_topic_total() {
        assert_eq!(extractor().extract_topic_total(TOPIC_PAGE), Some(123));
        assert_eq!(extractor().extract_topic_total("<html></html>"), None);
    }

    #[test]
    fn test_extract_entries() {
        let page = extractor().entry_page(ENTRY_PAGE);

        assert_eq!(page.page_count, Some(4));
        assert_eq!(page.entries.len(), 2);

        let first = &page.entries[0];
        assert_eq!(first.id.as_deref(), Some("100"));
        assert_eq!(first.author, "ssg");
        assert_eq!(first.body, "ilk entry\nikinci satır");
        assert_eq!(first.created_at, "18.10.2026 14:05");

        let second = &page.entries[1];
        assert!(second.is_edited());
        assert_eq!(
            second.body,
            "bkz: rust (https://eksisozluk.com/?q=rust) ve site (https://www.rust-lang.org)"
        );
    }

    #[test]
    fn test_empty_and_malformed_markup() {
        let ex = extractor();
        for markup in ["", "<html>", "<<<>>>", "<div id=\"content\"></div>", "plain text"] {
            assert!(ex.extract_topics(markup).is_empty());
            assert!(ex.extract_entries(markup).is_empty());
            assert!(ex.extract_channels(markup).is_empty());
            assert_eq!(ex.extract_page_count(markup), None);
        }
    }

    #[test]
    fn test_invalid_selector_yields_nothing() {
        let selectors = SiteSelectors {
            entry_item: "li[[".to_string(),
            ..Default::default()
        };
        let ex = Extractor::new(selectors, "https://eksisozluk.com");
        assert!(ex.extract_entries(ENTRY_PAGE).is_empty());
    }

    #[test]
    fn test_extract_channels() {
        let markup = r##"<ul id="channel-follow-list">
  <li><h2><a class="index-link" href="/basliklar/kanal/spor">#spor</a></h2></li>
  <li><h2><a class="index-link" href="/basliklar/kanal/bilim">#bilim</a></h2></li>
</ul>"##;
        let channels = extractor().extract_channels(markup);

        assert_eq!(
            channels,
            vec![
                Channel::new("spor", "/basliklar/kanal/spor"),
                Channel::new("bilim", "/basliklar/kanal/bilim"),
            ]
        );
    }

    #[test]
    fn test_extract_author_entries() {
        let markup = r#"<div id="topic">
  <div class="topic-item">
    <h1 id="title" data-title="rust"><a href="/rust--1">rust</a></h1>
    <ul id="entry-item-list"><li data-id="7">
      <div class="content">çok iyi</div>
      <a class="entry-date">01.01.2026 10:00</a>
    </li></ul>
  </div>
</div>"#;
        let entries = extractor().extract_author_entries(markup, "ssg");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "rust");
        assert_eq!(entries[0].1.author, "ssg");
        assert_eq!(entries[0].1.id.as_deref(), Some("7"));
        assert_eq!(entries[0].1.body, "çok iyi");
    }
}
