//! Console colour themes.

use crossterm::style::Color;
use serde::{de, Deserialize, Deserializer};

pub const DEFAULT_THEME: &str = "default";
pub const THEME_NAMES: [&str; 2] = ["default", "green"];

/// Colours for every role the console prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub index: Color,
    pub entry_text: Color,
    pub title_text: Color,
    pub title_banner: Color,
    pub channel_name: Color,
    pub prompt: Color,
    pub load_more: Color,
    pub timestamp: Color,
    pub author: Color,
    pub success: Color,
    pub error: Color,
    pub rule: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            index: Color::DarkGreen,
            entry_text: rgb(0xaf, 0xd7, 0x5f),
            title_text: rgb(0xe0, 0xa7, 0x34),
            title_banner: Color::Yellow,
            channel_name: rgb(0xe0, 0xa7, 0x34),
            prompt: rgb(0xe0, 0xa7, 0x34),
            load_more: rgb(0x81, 0xc1, 0x4b),
            timestamp: rgb(0xd7, 0x5f, 0x00),
            author: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            rule: Color::Yellow,
        }
    }
}

impl Theme {
    pub fn green() -> Self {
        Self {
            index: Color::DarkGreen,
            entry_text: rgb(0x5f, 0xd7, 0x00),
            title_text: rgb(0x00, 0xd7, 0x00),
            title_banner: rgb(0x00, 0xd7, 0x5f),
            channel_name: rgb(0x00, 0xd7, 0x00),
            prompt: rgb(0x00, 0xd7, 0x00),
            load_more: rgb(0x81, 0xc1, 0x4b),
            timestamp: Color::DarkGreen,
            author: rgb(0x00, 0x87, 0x00),
            success: Color::Green,
            error: Color::Green,
            rule: rgb(0x5f, 0x87, 0x5f),
        }
    }

    /// Look up a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "default" => Some(Self::default()),
            "green" => Some(Self::green()),
            _ => None,
        }
    }

    /// Built-in theme for `name` with the configured overrides applied.
    ///
    /// Unknown names fall back to the default theme.
    pub fn resolve(config: &ThemeConfig, name_override: Option<&str>) -> Self {
        let name = name_override.unwrap_or(&config.name);
        let mut theme = Self::by_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown theme {:?}, using {}", name, DEFAULT_THEME);
            Self::default()
        });
        config.colors.apply(&mut theme);
        theme
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

/// `[theme]` section of the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub name: String,
    pub colors: ColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ColorOverrides::default(),
        }
    }
}

/// Per-role colours that replace the chosen theme's values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColorOverrides {
    #[serde(deserialize_with = "deserialize_color")]
    pub index: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub entry_text: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub title_text: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub title_banner: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub channel_name: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub prompt: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub load_more: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub timestamp: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub author: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub success: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub error: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub rule: Option<Color>,
}

impl ColorOverrides {
    fn apply(&self, theme: &mut Theme) {
        let pairs = [
            (self.index, &mut theme.index),
            (self.entry_text, &mut theme.entry_text),
            (self.title_text, &mut theme.title_text),
            (self.title_banner, &mut theme.title_banner),
            (self.channel_name, &mut theme.channel_name),
            (self.prompt, &mut theme.prompt),
            (self.load_more, &mut theme.load_more),
            (self.timestamp, &mut theme.timestamp),
            (self.author, &mut theme.author),
            (self.success, &mut theme.success),
            (self.error, &mut theme.error),
            (self.rule, &mut theme.rule),
        ];
        for (color, slot) in pairs {
            if let Some(color) = color {
                *slot = color;
            }
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map(Some).map_err(de::Error::custom)
}

/// Parse a color string into a crossterm Color.
///
/// Supports:
/// - Named colors: "Black", "Red", "Green", "Yellow", "Blue", "Magenta", "Cyan",
///   "Grey", "White", their "Dark" variants and "Reset"
/// - Hex colors: "#RRGGBB" or "#RGB"
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "darkred" => Ok(Color::DarkRed),
        "green" => Ok(Color::Green),
        "darkgreen" => Ok(Color::DarkGreen),
        "yellow" => Ok(Color::Yellow),
        "darkyellow" => Ok(Color::DarkYellow),
        "blue" => Ok(Color::Blue),
        "darkblue" => Ok(Color::DarkBlue),
        "magenta" => Ok(Color::Magenta),
        "darkmagenta" => Ok(Color::DarkMagenta),
        "cyan" => Ok(Color::Cyan),
        "darkcyan" => Ok(Color::DarkCyan),
        "gray" | "grey" => Ok(Color::Grey),
        "darkgray" | "darkgrey" => Ok(Color::DarkGrey),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(|| format!("Invalid hex color: {}", s))
    };

    match hex.len() {
        6 => Ok(rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Ok(rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(format!("Invalid hex color format: {}", s)),
    }
}
