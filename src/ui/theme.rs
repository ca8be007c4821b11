//! Themes and ANSI escape sequence generation.
//!
//! Built-in themes are embedded TOML files; custom themes use the same
//! format and are loaded from disk.
//!
//! # Built-in Themes
//!
//! - `walnut`: dark, warm wood tones (default)
//! - `linen`: light
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#f2e6d8"
//! header_bg = "#4a3428"          # optional
//! text_normal = "#e8dccb"
//! text_dim = "#8f7f6e"
//! border = "#5c4636"
//! search_bar_border = "#c8955f"
//! match_highlight_fg = "#2b1d14"
//! match_highlight_bg = "#e3b778"
//! empty_state_fg = "#c8955f"
//! error_fg = "#e07a5f"
//! notice_fg = "#9cc28a"
//! accent_fg = "#f2c078"
//! ```

use crate::domain::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Names of the built-in themes.
pub const BUILTIN_THEMES: [&str; 2] = ["walnut", "linen"];

/// Color scheme for the painter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette.
    pub colors: ThemeColors,
}

/// Colors for every painted element, as hex strings (`#rrggbb`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary text: column headers, footer, disabled pager links.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    /// Load failures and error notifications.
    pub error_fg: String,
    /// Informational notifications.
    pub notice_fg: String,
    /// Current page marker and wishlist indicator.
    pub accent_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "walnut" => include_str!("../../themes/walnut.toml"),
            "linen" => include_str!("../../themes/linen.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            ConsoleError::Theme(format!(
                "failed to read theme file {}: {e}",
                path.as_ref().display()
            ))
        })?;

        toml::from_str(&contents)
            .map_err(|e| ConsoleError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Resolves the configured theme: a theme file wins over a name.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Theme`] for an unreadable file or an unknown
    /// built-in name.
    pub fn resolve(name: &str, file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            return Self::from_file(path);
        }

        Self::from_name(name).ok_or_else(|| {
            ConsoleError::Theme(format!(
                "unknown theme '{name}' (built-in: {})",
                BUILTIN_THEMES.join(", ")
            ))
        })
    }

    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape sequence for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape sequence for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the `walnut` theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse.
    fn default() -> Self {
        Self::from_name("walnut").expect("built-in walnut theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in BUILTIN_THEMES {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("catppuccin").is_none());
        assert!(Theme::from_name("linen").unwrap().colors.header_bg.is_none());
    }

    #[test]
    fn escape_sequences() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("102030"), "\u{1b}[48;2;16;32;48m");
        assert_eq!(Theme::fg("oops"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn theme_file_wins_over_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let custom = Theme {
            name: "custom".into(),
            ..Theme::default()
        };
        write!(file, "{}", toml::to_string(&custom).unwrap()).unwrap();

        let theme = Theme::resolve("linen", Some(file.path())).unwrap();
        assert_eq!(theme.name, "custom");

        assert!(matches!(
            Theme::resolve("mahogany", None),
            Err(ConsoleError::Theme(_))
        ));
    }
}
