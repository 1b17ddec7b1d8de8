//! Themed line output for menus, topics and entries.

use std::fmt::Display;
use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use crate::config::Theme;
use crate::domain::{Channel, Entry, FavouriteEntry, FavouriteTopic, Topic};

const RULE_WIDTH: usize = 60;
const CHANNELS_PER_ROW: usize = 5;
pub const FAVOURITE_MARK: &str = "★";

pub struct Console<W: Write> {
    out: W,
    theme: Theme,
    color: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self {
            out,
            theme,
            color: true,
        }
    }

    /// Emit text only, no colour escapes.
    pub fn plain(out: W) -> Self {
        Self {
            out,
            theme: Theme::default(),
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled(&mut self, color: Color, text: impl Display) -> io::Result<()> {
        if self.color {
            queue!(self.out, SetForegroundColor(color), Print(text), ResetColor)
        } else {
            write!(self.out, "{}", text)
        }
    }

    fn index(&mut self, index: usize, width: usize) -> io::Result<()> {
        let color = self.theme.index;
        self.styled(color, "[")?;
        write!(self.out, "{:>width$}", index, width = width)?;
        self.styled(color, "]")?;
        write!(self.out, " ")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn rule(&mut self) -> io::Result<()> {
        let color = self.theme.rule;
        self.styled(color, "─".repeat(RULE_WIDTH))?;
        writeln!(self.out)
    }

    pub fn banner(&mut self, title: &str) -> io::Result<()> {
        let color = self.theme.title_banner;
        writeln!(self.out)?;
        self.styled(color, title)?;
        writeln!(self.out)
    }

    /// Prompt without a trailing newline; the answer is typed on the same line.
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        let color = self.theme.prompt;
        self.styled(color, format!("{}: ", text))?;
        self.out.flush()
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        let color = self.theme.success;
        self.styled(color, message)?;
        writeln!(self.out)
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        let color = self.theme.error;
        self.styled(color, message)?;
        writeln!(self.out)
    }

    pub fn more_hint(&mut self, keys: &str) -> io::Result<()> {
        let color = self.theme.load_more;
        self.styled(color, format!("-- more: {} --", keys))?;
        writeln!(self.out)
    }

    pub fn topic(&mut self, index: usize, width: usize, topic: &Topic) -> io::Result<()> {
        self.index(index, width)?;
        let color = self.theme.title_text;
        self.styled(color, &topic.title)?;
        if topic.entry_count > 0 {
            let color = self.theme.timestamp;
            self.styled(color, format!(" ({})", topic.entry_count))?;
        }
        writeln!(self.out)
    }

    pub fn favourite_topic(&mut self, index: usize, width: usize, topic: &FavouriteTopic) -> io::Result<()> {
        self.index(index, width)?;
        let color = self.theme.title_text;
        self.styled(color, &topic.title)?;
        writeln!(self.out)
    }

    /// Channels in rows of five.
    pub fn channels(&mut self, channels: &[Channel]) -> io::Result<()> {
        let width = channels.len().to_string().len();
        for (i, channel) in channels.iter().enumerate() {
            let index = i + 1;
            self.index(index, width)?;
            let color = self.theme.channel_name;
            self.styled(color, &channel.name)?;
            if index % CHANNELS_PER_ROW == 0 {
                writeln!(self.out)?;
            } else {
                write!(self.out, " ")?;
            }
        }
        if channels.len() % CHANNELS_PER_ROW != 0 {
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// An entry as `body |stamp| author`, then a rule.
    pub fn entry(&mut self, index: Option<(usize, usize)>, entry: &Entry) -> io::Result<()> {
        if let Some((index, width)) = index {
            self.index(index, width)?;
        }
        if entry.favourite {
            let color = self.theme.success;
            self.styled(color, format!("{} ", FAVOURITE_MARK))?;
        }
        self.entry_body(&entry.body, &entry.created_at, &entry.author)?;
        self.rule()
    }

    /// A saved entry headed by its topic title.
    pub fn saved_entry(&mut self, index: Option<(usize, usize)>, entry: &FavouriteEntry) -> io::Result<()> {
        if let Some((index, width)) = index {
            self.index(index, width)?;
        }
        self.heading(&entry.topic_title)?;
        self.entry_body(&entry.body, &entry.created_at, &entry.author)?;
        self.rule()
    }

    /// An entry from a listing that spans topics, e.g. an author's profile.
    pub fn titled_entry(&mut self, title: &str, entry: &Entry) -> io::Result<()> {
        self.heading(title)?;
        self.entry_body(&entry.body, &entry.created_at, &entry.author)?;
        self.rule()
    }

    fn heading(&mut self, title: &str) -> io::Result<()> {
        let color = self.theme.title_text;
        self.styled(color, format!(">>> {}", title))?;
        writeln!(self.out)
    }

    fn entry_body(&mut self, body: &str, stamp: &str, author: &str) -> io::Result<()> {
        let (text, timestamp, author_color) =
            (self.theme.entry_text, self.theme.timestamp, self.theme.author);
        self.styled(text, body)?;
        write!(self.out, " ")?;
        self.styled(timestamp, format!("|{}|", stamp))?;
        write!(self.out, " ")?;
        self.styled(author_color, author)?;
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
