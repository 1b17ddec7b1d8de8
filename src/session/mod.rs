//! The interactive loop: channel, topic and entry menus over the fetcher and
//! the favourites store.
//!
//! Network failures never end a session. The error is shown and the user
//! lands back on the menu they came from.

mod listing;

pub use listing::{Cursor, Listing};

use std::io::{BufRead, Write};

use chrono::{Local, NaiveDate};

use crate::app::{ReaderError, Result};
use crate::console::FAVOURITE_MARK;
use crate::domain::{Channel, Entry, SaveOutcome, Topic};
use crate::extractor::Extractor;
use crate::fetcher::{Fetcher, SiteUrls};
use crate::menu::{Action, Menu};
use crate::store::FavouriteStore;

const TOPIC_INDEX_WIDTH: usize = 3;
const ENTRY_INDEX_WIDTH: usize = 2;

/// Flags that shape a session.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Items taken from each fetched page.
    pub count: Option<usize>,
    /// Selecting a topic saves it instead of opening it.
    pub favtitle: bool,
    /// Selecting an entry saves it without asking.
    pub faventry: bool,
    /// Start from the channel menu instead of the default channel.
    pub channels: bool,
    pub getfavs: bool,
    pub showfavs: bool,
    pub today: bool,
    pub favtopics: bool,
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Channel (optional) → topics → entries.
    Browse,
    /// Today's entries of every favourite topic.
    FavouriteTopicsToday,
    SavedEntries { today: bool },
    SavedTopics,
    Author(String),
}

impl Options {
    pub fn mode(&self) -> Mode {
        if let Some(nick) = self.author.as_ref().filter(|n| !n.trim().is_empty()) {
            Mode::Author(nick.trim().to_string())
        } else if self.showfavs {
            Mode::SavedEntries { today: self.today }
        } else if self.getfavs {
            Mode::FavouriteTopicsToday
        } else if self.favtopics {
            Mode::SavedTopics
        } else {
            Mode::Browse
        }
    }
}

pub struct Session<'a, F, S, R, W>
where
    F: Fetcher + ?Sized,
    S: FavouriteStore + ?Sized,
    R: BufRead,
    W: Write,
{
    fetcher: &'a F,
    store: &'a S,
    extractor: &'a Extractor,
    urls: &'a SiteUrls,
    menu: Menu<R, W>,
    options: Options,
}

impl<'a, F, S, R, W> Session<'a, F, S, R, W>
where
    F: Fetcher + ?Sized,
    S: FavouriteStore + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(
        fetcher: &'a F,
        store: &'a S,
        extractor: &'a Extractor,
        urls: &'a SiteUrls,
        menu: Menu<R, W>,
        options: Options,
    ) -> Self {
        Self {
            fetcher,
            store,
            extractor,
            urls,
            menu,
            options,
        }
    }

    pub fn into_menu(self) -> Menu<R, W> {
        self.menu
    }

    pub async fn run(&mut self) -> Result<()> {
        let mode = self.options.mode();
        tracing::debug!(?mode, "Starting session");

        let result = match mode {
            Mode::Browse => self.browse().await,
            Mode::FavouriteTopicsToday => self.favourite_topics_today().await,
            Mode::SavedEntries { today } => self.saved_entries(today),
            Mode::SavedTopics => self.saved_topics().await,
            Mode::Author(nick) => self.author(&nick).await,
        };

        self.menu.console().flush()?;
        result
    }

    async fn browse(&mut self) -> Result<()> {
        if !self.options.channels {
            return self.topic_list(&Channel::default_channel()).await;
        }

        let channels = self.channels().await?;
        loop {
            let console = self.menu.console();
            console.banner("Channels")?;
            console.channels(&channels)?;

            match self.menu.choose("Channel", channels.len(), false)? {
                Action::Select(i) => {
                    if let Some(channel) = channels.get(i - 1).cloned() {
                        self.topic_list(&channel).await?;
                    }
                }
                Action::Exit => return Ok(()),
                Action::LoadMore | Action::Invalid(_) => {}
            }
        }
    }

    /// Built-in channels followed by the ones listed on the channel index.
    async fn channels(&mut self) -> Result<Vec<Channel>> {
        let mut channels = Channel::unlisted();

        let url = self.urls.channel_index()?;
        match self.fetcher.fetch(&url).await {
            Ok(markup) => {
                let listed = self.extractor.extract_channels(&markup);
                tracing::debug!(count = listed.len(), "Parsed channel index");
                channels.extend(listed);
            }
            Err(e) => {
                self.report(e)?;
                tracing::warn!("Falling back to built-in channels");
            }
        }

        Ok(channels)
    }

    async fn topic_list(&mut self, channel: &Channel) -> Result<()> {
        let mut topics = Listing::new();
        if let Err(e) = self.load_topics(channel, &mut topics).await {
            return self.report(e);
        }
        if topics.is_empty() {
            self.menu
                .console()
                .error(&format!("No topics found in {}", channel.name))?;
            return Ok(());
        }

        let prompt = if self.options.favtitle {
            format!("{} Topic to favourite", FAVOURITE_MARK)
        } else {
            "Topic".to_string()
        };

        let mut shown = 0;
        loop {
            if shown == 0 {
                self.menu.console().banner(&channel.name)?;
            }
            for (i, topic) in topics.iter_from(shown + 1) {
                self.menu.console().topic(i, TOPIC_INDEX_WIDTH, topic)?;
            }
            shown = topics.len();
            self.more_hint(topics.has_more())?;

            match self.menu.choose(&prompt, topics.len(), topics.has_more())? {
                Action::Exit => return Ok(()),
                Action::LoadMore => {
                    if let Err(e) = self.load_topics(channel, &mut topics).await {
                        self.report(e)?;
                    }
                }
                Action::Select(i) => {
                    let Some(topic) = topics.get(i).cloned() else {
                        continue;
                    };
                    if self.options.favtitle {
                        self.favourite_topic(&topic)?;
                    } else {
                        self.entry_list(&topic, None).await?;
                        shown = 0;
                    }
                }
                Action::Invalid(_) => {}
            }
        }
    }

    async fn load_topics(&self, channel: &Channel, topics: &mut Listing<Topic>) -> Result<()> {
        let url = self.urls.channel_page(&channel.link, topics.cursor.next_page)?;
        let markup = self.fetcher.fetch(&url).await?;
        let page = self.extractor.topic_page(&markup);
        tracing::debug!(%url, topics = page.topics.len(), total = ?page.total, "Parsed topic page");

        if page.total.is_some() {
            topics.cursor.total_items = page.total;
        }
        topics.push_page(page.topics, self.options.count);
        Ok(())
    }

    /// Entries of `topic`, or only those written on `day`.
    async fn entry_list(&mut self, topic: &Topic, day: Option<NaiveDate>) -> Result<()> {
        let mut entries = Listing::new();
        self.menu.console().banner(&topic.title)?;
        if let Err(e) = self.load_entries(topic, day, &mut entries).await {
            return self.report(e);
        }
        if entries.is_empty() {
            self.menu.console().error("No entries")?;
            return Ok(());
        }

        let prompt = format!("{} Entry to favourite", FAVOURITE_MARK);
        let mut shown = 0;
        loop {
            for (i, entry) in entries.iter_from(shown + 1) {
                let mut entry = entry.clone();
                entry.favourite = self.is_favourite(&entry);
                self.menu
                    .console()
                    .entry(Some((i, ENTRY_INDEX_WIDTH)), &entry)?;
            }
            shown = entries.len();
            self.more_hint(entries.has_more())?;

            match self.menu.choose(&prompt, entries.len(), entries.has_more())? {
                Action::Exit => return Ok(()),
                Action::LoadMore => {
                    if let Err(e) = self.load_entries(topic, day, &mut entries).await {
                        self.report(e)?;
                    }
                }
                Action::Select(i) => {
                    if let Some(entry) = entries.get(i).cloned() {
                        self.favourite_entry(topic, i, &entry)?;
                    }
                }
                Action::Invalid(_) => {}
            }
        }
    }

    async fn load_entries(
        &self,
        topic: &Topic,
        day: Option<NaiveDate>,
        entries: &mut Listing<Entry>,
    ) -> Result<()> {
        let page = entries.cursor.next_page;
        let url = match day {
            Some(day) => self.urls.topic_day_page(&topic.identifier, day, page)?,
            None => self.urls.topic_page(&topic.identifier, page)?,
        };

        let markup = self.fetcher.fetch(&url).await?;
        let parsed = self.extractor.entry_page(&markup);
        tracing::debug!(%url, entries = parsed.entries.len(), pages = ?parsed.page_count, "Parsed entry page");

        if parsed.page_count.is_some() {
            entries.cursor.page_count = parsed.page_count;
        }
        entries.push_page(parsed.entries, self.options.count);
        Ok(())
    }

    fn is_favourite(&self, entry: &Entry) -> bool {
        self.store
            .entry_exists(&entry.fingerprint())
            .unwrap_or_else(|e| {
                tracing::warn!("Could not look up favourite: {}", e);
                false
            })
    }

    fn favourite_topic(&mut self, topic: &Topic) -> Result<()> {
        match self.store.save_topic(topic) {
            Ok(SaveOutcome::Inserted) => {
                tracing::info!(topic = %topic.identifier, "Saved favourite topic");
                self.menu
                    .console()
                    .success(&format!("{} {} saved to favourites", FAVOURITE_MARK, topic.title))?;
            }
            Ok(SaveOutcome::AlreadyExists) => {
                self.menu
                    .console()
                    .success(&format!("{} is already in favourites", topic.title))?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn favourite_entry(&mut self, topic: &Topic, index: usize, entry: &Entry) -> Result<()> {
        if !self.options.faventry
            && !self
                .menu
                .confirm(&format!("Add entry {} to favourites?", index))?
        {
            return Ok(());
        }

        match self.store.save_entry(topic, entry) {
            Ok(SaveOutcome::Inserted) => {
                tracing::info!(topic = %topic.identifier, "Saved favourite entry");
                self.menu
                    .console()
                    .success(&format!("{} Entry {} saved to favourites", FAVOURITE_MARK, index))?;
            }
            Ok(SaveOutcome::AlreadyExists) => {
                self.menu
                    .console()
                    .success(&format!("Entry {} is already in favourites", index))?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    async fn favourite_topics_today(&mut self) -> Result<()> {
        let topics = match self.store.list_topics() {
            Ok(topics) => topics,
            Err(e) => return self.report(e),
        };
        if topics.is_empty() {
            self.menu.console().error("No favourite topics saved")?;
            return Ok(());
        }

        let today = Local::now().date_naive();
        for favourite in &topics {
            self.entry_list(&favourite.to_topic(), Some(today)).await?;
        }
        Ok(())
    }

    fn saved_entries(&mut self, today: bool) -> Result<()> {
        let listed = if today {
            self.store.list_entries_today()
        } else {
            self.store.list_all_entries()
        };
        let entries = match listed {
            Ok(entries) => entries,
            Err(e) => return self.report(e),
        };

        let banner = if today {
            format!("{} Favourite entries of today", FAVOURITE_MARK)
        } else {
            format!("{} Favourite entries", FAVOURITE_MARK)
        };
        self.menu.console().banner(&banner)?;
        if entries.is_empty() {
            self.menu.console().error("No favourite entries")?;
            return Ok(());
        }

        for (i, entry) in entries.iter().enumerate() {
            self.menu
                .console()
                .saved_entry(Some((i + 1, ENTRY_INDEX_WIDTH)), entry)?;
        }

        loop {
            match self.menu.choose("Entry", entries.len(), false)? {
                Action::Select(i) => {
                    if let Some(entry) = entries.get(i - 1) {
                        self.menu.console().saved_entry(None, entry)?;
                    }
                }
                Action::Exit => return Ok(()),
                Action::LoadMore | Action::Invalid(_) => {}
            }
        }
    }

    async fn saved_topics(&mut self) -> Result<()> {
        loop {
            let topics = match self.store.list_topics() {
                Ok(topics) => topics,
                Err(e) => return self.report(e),
            };

            let console = self.menu.console();
            console.banner(&format!("{} Favourite topics", FAVOURITE_MARK))?;
            if topics.is_empty() {
                console.error("No favourite topics saved")?;
                return Ok(());
            }
            for (i, topic) in topics.iter().enumerate() {
                console.favourite_topic(i + 1, TOPIC_INDEX_WIDTH, topic)?;
            }

            match self.menu.choose("Topic", topics.len(), false)? {
                Action::Select(i) => {
                    if let Some(favourite) = topics.get(i - 1) {
                        self.entry_list(&favourite.to_topic(), None).await?;
                    }
                }
                Action::Exit => return Ok(()),
                Action::LoadMore | Action::Invalid(_) => {}
            }
        }
    }

    async fn author(&mut self, nick: &str) -> Result<()> {
        let url = self.urls.author_page(nick)?;
        let markup = match self.fetcher.fetch(&url).await {
            Ok(markup) => markup,
            Err(e) => return self.report(e),
        };
        let entries = self.extractor.extract_author_entries(&markup, nick);
        tracing::debug!(%url, entries = entries.len(), "Parsed author page");

        let console = self.menu.console();
        console.banner(nick)?;
        if entries.is_empty() {
            console.error(&format!("No entries found for {}", nick))?;
            return Ok(());
        }
        for (title, entry) in &entries {
            console.titled_entry(title, entry)?;
        }
        Ok(())
    }

    fn more_hint(&mut self, more: bool) -> Result<()> {
        if more {
            let hint = self.menu.keys().more_hint();
            self.menu.console().more_hint(&hint)?;
        }
        Ok(())
    }

    /// Show a recoverable error and carry on; anything else ends the session.
    fn report(&mut self, err: ReaderError) -> Result<()> {
        if !err.is_recoverable() {
            return Err(err);
        }
        tracing::warn!("{}", err);
        self.menu.console().error(&err.to_string())?;
        Ok(())
    }
}
