use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::window::Coord;

/// Theme file name inside the user's txmenu directory.
pub const THEME_FILE: &str = "theme.json";

/// Directory (relative to home) holding the theme and debug log.
pub const TXMENU_DIR: &str = ".txmenu";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read theme file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse theme file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid theme: {0}")]
    Invalid(String),
}

/// An RGB color, written as `#rrggbb` in theme files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) string.
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#').unwrap_or(value);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Color::parse(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{value}'")))
    }
}

/// Geometry and colors for menus.
///
/// Every dimension is in display pixels. A theme is passed to each menu at
/// construction, so tests can build menus with whatever geometry they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Display width.
    pub lcd_width: Coord,
    /// Display height.
    pub lcd_height: Coord,

    /// Fixed width of the menu panel.
    pub menu_width: Coord,
    /// Height of one selectable line.
    pub line_height: Coord,
    /// Height of the title band (used only when a title is set).
    pub header_height: Coord,
    /// Height of the "Cancel" band, 0 to hide it.
    pub footer_height: Coord,
    /// Lower clamp for the visible body height.
    pub min_body_height: Coord,
    /// Upper clamp for the visible body height.
    pub max_body_height: Coord,
    /// Added to the vertical position of a centered menu.
    pub offset_top: Coord,
    /// Left indent of line labels.
    pub text_indent: Coord,

    pub background: Color,
    pub text: Color,
    pub highlight_text: Color,
    pub highlight_background: Color,
    pub separator: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            lcd_width: 480,
            lcd_height: 272,
            menu_width: 200,
            line_height: 40,
            header_height: 40,
            footer_height: 40,
            min_body_height: 39,
            max_body_height: 159,
            offset_top: 8,
            text_indent: 10,
            background: Color::WHITE,
            text: Color::BLACK,
            highlight_text: Color::WHITE,
            highlight_background: Color::rgb(0x1e, 0x5a, 0xa0),
            separator: Color::rgb(0xc0, 0xc0, 0xc0),
        }
    }
}

impl Theme {
    /// Load a theme from a JSON file.
    ///
    /// Returns the default theme if the file doesn't exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let theme: Theme = serde_json::from_str(&contents)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Load the theme from `~/.txmenu/theme.json`.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(default_theme_path())
    }

    /// Reject geometry the menu layout cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_height <= 0 {
            return Err(ConfigError::Invalid("line_height must be positive".to_string()));
        }
        if self.menu_width <= 0 {
            return Err(ConfigError::Invalid("menu_width must be positive".to_string()));
        }
        if self.menu_width > self.lcd_width {
            return Err(ConfigError::Invalid(format!(
                "menu_width {} exceeds lcd_width {}",
                self.menu_width, self.lcd_width
            )));
        }
        if self.min_body_height > self.max_body_height {
            return Err(ConfigError::Invalid(format!(
                "min_body_height {} is greater than max_body_height {}",
                self.min_body_height, self.max_body_height
            )));
        }
        Ok(())
    }
}

/// Directory for txmenu user files, falling back to the working directory.
pub fn txmenu_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(TXMENU_DIR)
}

pub fn default_theme_path() -> PathBuf {
    txmenu_dir().join(THEME_FILE)
}
