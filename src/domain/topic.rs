use serde::{Deserialize, Serialize};

/// A discussion thread ("başlık") as listed on a channel page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub title: String,
    /// Site path without the query string, e.g. `/rust--123456`.
    pub identifier: String,
    /// Today's entry count shown next to the title, 0 when absent.
    pub entry_count: u32,
}

impl Topic {
    pub fn new(title: impl Into<String>, identifier: impl Into<String>, entry_count: u32) -> Self {
        Self {
            title: title.into(),
            identifier: identifier.into(),
            entry_count,
        }
    }

    /// Parse the site's abbreviated count: `"57"` is 57, `"1,2b"` is 1200.
    pub fn parse_entry_count(text: &str) -> u32 {
        let text = text.trim();

        match text.split_once(',') {
            Some((thousands, rest)) => {
                let thousands = thousands.trim().parse::<u32>().unwrap_or(0);
                let hundreds = rest
                    .chars()
                    .next()
                    .and_then(|c| c.to_digit(10))
                    .unwrap_or(0);
                thousands.saturating_mul(1000).saturating_add(hundreds * 100)
            }
            None => text
                .trim_end_matches(|c: char| !c.is_ascii_digit())
                .parse()
                .unwrap_or(0),
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}
