//! Numbered selection menu over a line-based input.

use std::io::{BufRead, Write};

use crate::app::Result;
use crate::config::MenuKeys;
use crate::console::Console;

/// What a line of user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 1-based index into the listing on screen.
    Select(usize),
    LoadMore,
    Exit,
    Invalid(String),
}

/// Interpret one line of input against a listing of `len` items.
///
/// The exit sentinel wins over everything else. The more sentinel is only
/// accepted while another page is available.
pub fn parse_selection(input: &str, len: usize, more_available: bool, keys: &MenuKeys) -> Action {
    let trimmed = input.trim();

    if keys.is_exit(trimmed) {
        return Action::Exit;
    }
    if keys.is_more(trimmed) {
        return if more_available {
            Action::LoadMore
        } else {
            Action::Invalid(input.to_string())
        };
    }

    match trimmed.parse::<usize>() {
        Ok(i) if (1..=len).contains(&i) => Action::Select(i),
        _ => Action::Invalid(input.to_string()),
    }
}

pub struct Menu<R: BufRead, W: Write> {
    input: R,
    console: Console<W>,
    keys: MenuKeys,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, console: Console<W>, keys: MenuKeys) -> Self {
        Self {
            input,
            console,
            keys,
        }
    }

    pub fn console(&mut self) -> &mut Console<W> {
        &mut self.console
    }

    pub fn keys(&self) -> &MenuKeys {
        &self.keys
    }

    pub fn into_console(self) -> Console<W> {
        self.console
    }

    /// Prompt and read one line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.console.prompt(prompt)?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.console.blank()?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompt until the input parses to something other than
    /// [`Action::Invalid`]. End of input is [`Action::Exit`].
    pub fn choose(&mut self, prompt: &str, len: usize, more_available: bool) -> Result<Action> {
        let prompt = self.decorate(prompt, len, more_available);

        loop {
            let Some(line) = self.ask(&prompt)? else {
                return Ok(Action::Exit);
            };

            match parse_selection(&line, len, more_available, &self.keys) {
                Action::Invalid(raw) => {
                    tracing::debug!(input = %raw, len, "Rejected menu input");
                    self.console
                        .error(&format!("Invalid selection: {:?}", raw.trim()))?;
                }
                action => return Ok(action),
            }
        }
    }

    /// Yes/no question; anything but `y` or `yes` is no.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} (y/N)", prompt))?;
        Ok(matches!(
            answer.map(|a| a.trim().to_lowercase()).as_deref(),
            Some("y" | "yes")
        ))
    }

    fn decorate(&self, prompt: &str, len: usize, more_available: bool) -> String {
        let mut hints = Vec::new();
        if len > 0 {
            hints.push(format!("1-{}", len));
        }
        if more_available {
            hints.push(format!("{} more", self.keys.more_hint()));
        }
        hints.push(format!("{} quit", self.keys.exit_hint()));
        format!("{} [{}]", prompt, hints.join(", "))
    }
}
