//! Menu sentinel configuration.

use serde::Deserialize;

/// Inputs that the selection menu treats as commands instead of indices.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MenuKeys {
    /// Leave the current menu level.
    pub exit: Vec<String>,
    /// Load the next page; an empty string means a bare Enter.
    pub more: Vec<String>,
}

impl Default for MenuKeys {
    fn default() -> Self {
        Self {
            exit: vec!["q".to_string()],
            more: vec!["m".to_string(), String::new()],
        }
    }
}

impl MenuKeys {
    pub fn is_exit(&self, input: &str) -> bool {
        Self::matches(input, &self.exit)
    }

    pub fn is_more(&self, input: &str) -> bool {
        Self::matches(input, &self.more)
    }

    /// Label for prompts, e.g. `m | Enter`.
    pub fn more_hint(&self) -> String {
        self.more
            .iter()
            .map(|k| if k.is_empty() { "Enter" } else { k.as_str() })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn exit_hint(&self) -> &str {
        self.exit.first().map(String::as_str).unwrap_or("q")
    }

    fn matches(input: &str, keys: &[String]) -> bool {
        let input = input.trim();
        keys.iter().any(|k| k.trim().eq_ignore_ascii_case(input))
    }
}
