//! Theme management and ANSI escape sequence generation.
//!
//! Two built-in themes ship with the binary (`catppuccin-mocha`, the default,
//! and `catppuccin-latte`); custom themes load from TOML files with the same
//! shape.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cba6f7"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#89b4fa"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! active_filter_fg = "#a6e3a1"
//! favorite_fg = "#f38ba8"
//! error_fg = "#f38ba8"
//! ```

use crate::domain::error::{MovieDeckError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Focus ring foreground.
    pub selection_fg: String,
    /// Focus ring background.
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text (footer, card metadata).
    pub text_dim: String,

    pub border: String,
    pub search_bar_border: String,

    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    /// Label color of the filter feeding the grid.
    pub active_filter_fg: String,
    /// Favorite badge color.
    pub favorite_fg: String,
    /// Inline request error color.
    pub error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use moviedeck::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| MovieDeckError::Config(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| MovieDeckError::Config(format!("Failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple, white on parse errors.
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

    /// ANSI 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
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

    /// Palette used if the bundled default ever fails to parse.
    fn monochrome() -> Self {
        let white = || "#ffffff".to_string();
        let black = || "#000000".to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: white(),
                header_bg: None,
                selection_fg: black(),
                selection_bg: white(),
                text_normal: white(),
                text_dim: "#808080".to_string(),
                border: "#808080".to_string(),
                search_bar_border: white(),
                match_highlight_fg: black(),
                match_highlight_bg: white(),
                empty_state_fg: white(),
                active_filter_fg: white(),
                favorite_fg: white(),
                error_fg: white(),
            },
        }
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").unwrap_or_else(Self::monochrome)
    }
}
