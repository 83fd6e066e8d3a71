//! MovieDeck: a keyboard-only terminal movie browser backed by TMDB.
//!
//! MovieDeck shows popular and now-playing movies in a paged card grid, keeps
//! a persistent favorites list, and searches as you type. Everything is
//! driven from the keyboard.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal runtime (main.rs)                         │  ← crossterm + tokio
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application layer (app/)                           │
//! │  - Event handling, routes                           │
//! │  - Focus effect execution (focus/)                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI (ui/)      │   │ Store         │   │ Orchestrator  │
//! │ - Rendering   │   │ (store/)      │   │ (orchestrator)│
//! │ - Theming     │   │ - Transitions │   │ - Latest-wins │
//! │ - Components  │   │ - Selectors   │   │ - Debounce    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │                    │
//!                     ┌───────────────┐   ┌───────────────┐
//!                     │ Persistence   │   │ Gateway       │
//!                     │ (storage/)    │   │ (gateway/)    │
//!                     └───────────────┘   └───────────────┘
//! ```
//!
//! All state lives in a single [`Store`]. Keys are turned into store
//! transitions by the application layer; the orchestrator and the persistence
//! bridge subscribe to committed transitions and react with fetches or
//! writes, committing their outcomes back as further transitions.
//!
//! # Modules
//!
//! - [`app`]: Event handling, routes and view model computation
//! - [`domain`]: Movie types and the crate error
//! - [`focus`]: Pure keyboard focus state machine
//! - [`gateway`]: Remote movie data (TMDB)
//! - [`infrastructure`]: Platform directories
//! - [`orchestrator`]: Async fetch routines reacting to store commits
//! - [`storage`]: Key-value persistence and the favorites bridge
//! - [`store`]: Application state, transitions and selectors
//! - [`ui`]: Terminal rendering with theme support
//! - `observability`: File logging and OpenTelemetry export
//!
//! # Configuration
//!
//! Read from `<config dir>/moviedeck/config.toml`; every key is optional.
//!
//! ```toml
//! api_read_token = "eyJhbGciOi..."
//! grid_columns = 5
//! search_debounce_ms = 300
//! cancel_scope = "global"
//! theme = "catppuccin-latte"
//! trace_level = "debug"
//! ```
//!
//! `TMDB_API_READ_TOKEN`, `TMDB_API_KEY` and `MOVIEDECK_DATA_DIR` override
//! the file.

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod focus;
pub mod gateway;
pub mod infrastructure;
pub mod orchestrator;
pub mod storage;
pub mod store;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{MovieDeckError, Result};
pub use store::Store;
pub use ui::Theme;

use orchestrator::CancelScope;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Runtime configuration.
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB v3 API root.
    pub api_base_url: String,
    /// Image base for posters (w500).
    pub poster_base_url: String,
    /// Image base for backdrops (w1280).
    pub backdrop_base_url: String,

    /// TMDB v4 read access token. Preferred over `api_key`.
    pub api_read_token: Option<String>,
    /// TMDB v3 API key.
    pub api_key: Option<String>,

    pub request_timeout_ms: u64,

    /// Quiet period after the last keystroke before a search is issued.
    pub search_debounce_ms: u64,
    /// Searches allowed per `search_window_ms`.
    pub search_max_requests: usize,
    pub search_window_ms: u64,

    /// How long a category button must keep focus before it activates.
    pub category_focus_delay_ms: u64,

    /// Cards per grid row.
    pub grid_columns: usize,

    /// Whether a category request cancels the other category's fetch.
    pub cancel_scope: CancelScope,

    /// Built-in theme: `catppuccin-mocha` or `catppuccin-latte`.
    ///
    /// Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<PathBuf>,

    /// `EnvFilter` directive for the log file. Default: `"info"`
    pub trace_level: Option<String>,

    /// Also export spans as OTLP/JSON.
    pub otlp_traces: bool,

    /// Where favorites and logs are kept. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.themoviedb.org/3".to_string(),
            poster_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            backdrop_base_url: "https://image.tmdb.org/t/p/w1280".to_string(),
            api_read_token: None,
            api_key: None,
            request_timeout_ms: 8000,
            search_debounce_ms: 500,
            search_max_requests: 5,
            search_window_ms: 10_000,
            category_focus_delay_ms: 2000,
            grid_columns: 4,
            cancel_scope: CancelScope::PerCategory,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            otlp_traces: false,
            data_dir: None,
        }
    }
}

impl Config {
    /// Loads the user configuration file, then applies environment overrides.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MovieDeckError::Config`] if the file exists but cannot be
    /// read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = match infrastructure::config_file() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`MovieDeckError::Config`] on read or parse failure.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| MovieDeckError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`MovieDeckError::Config`] on invalid TOML or unknown values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use moviedeck::Config;
    ///
    /// let config = Config::from_toml("grid_columns = 6\ntheme = \"catppuccin-latte\"")?;
    /// assert_eq!(config.grid_columns, 6);
    /// assert_eq!(config.search_debounce_ms, 500);
    /// # Ok::<(), moviedeck::MovieDeckError>(())
    /// ```
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| MovieDeckError::Config(format!("invalid config: {e}")))
    }

    /// Applies the environment overrides, looked up through `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(token) = lookup("TMDB_API_READ_TOKEN") {
            self.api_read_token = Some(token);
        }
        if let Some(key) = lookup("TMDB_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(dir) = lookup("MOVIEDECK_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// Resolved data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(infrastructure::default_data_dir, infrastructure::expand_tilde)
    }

    /// Loads the configured theme, falling back to the default on any error.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path.display(), error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the application state for a fresh process.
#[must_use]
pub fn initialize(config: &Config, store: Store) -> AppState {
    tracing::debug!(columns = config.grid_columns, "initializing moviedeck");
    AppState::new(store, config.theme(), config)
}
