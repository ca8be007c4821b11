//! Wud' console: list, filter and pagination controller for the Wud'
//! furniture shop.
//!
//! The admin panel has six listings (products, categories, orders, users,
//! custom requests, blog posts) and the storefront has one (the catalog).
//! They all share one controller:
//! - Filter state with whitelisted values and page reset on every change
//! - A loader that normalizes the many envelope shapes the Data API returns
//! - A pure renderer from filter state and load outcome to a view model
//! - A dispatcher with search debounce, out-of-order protection, delete
//!   confirmation, edit forms and optimistic wishlist toggles

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs) / ListRuntime (runtime)              │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Filter store                                     │
//! │  - Event handling / action dispatching              │
//! │  - Loader and envelope normalization                │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Data API      │   │ Worker Layer  │
//! │ (ui/)         │   │ (api/)        │   │ (worker/)     │
//! │ - View model  │   │ - DataApi     │   │ - tokio tasks │
//! │ - Theming     │   │ - reqwest     │   │ - typed msgs  │
//! │ - Components  │   │ - multipart   │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Resource catalogue, records (domain/)            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - JSON log file with rotation                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! `~/.config/wud-console/config.toml`:
//!
//! ```toml
//! api_url = "https://wud.example/api"
//! auth_token = "..."
//! page_size = 20
//! search_debounce_ms = 500
//! theme = "walnut"
//! trace_level = "debug"
//! ```
//!
//! `WUD_API_URL`, `WUD_API_TOKEN` and `WUD_TRACE_LEVEL` override the file.
//!
//! # Example
//!
//! ```rust
//! use wud_console::app::{handle_event, Event, FilterChange};
//! use wud_console::domain::ResourceKind;
//! use wud_console::{initialize, Config};
//!
//! let (mut console, _theme) = initialize(&Config::default(), ResourceKind::Orders);
//! let state = console.active_mut();
//!
//! handle_event(state, &Event::Open)?;
//! handle_event(state, &Event::ChangeFilters(FilterChange::default().filter("status", "paid")))?;
//! assert_eq!(state.filter().page, 1);
//! # Ok::<(), wud_console::ConsoleError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, Console, Event, ListState};
pub use domain::{ConsoleError, ResourceKind, Result};
pub use runtime::{AutoConfirm, ConfirmationPrompt, ListRuntime};
pub use ui::Theme;

use crate::app::filter::{DEFAULT_PAGE_SIZE, PAGE_SIZES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default Data API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default search debounce window.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Console configuration.
///
/// Read from `config.toml` in the configuration directory; every key is
/// optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data API base URL. Default: `http://localhost:5000/api`
    pub api_url: String,

    /// Bearer credential for admin listings.
    pub auth_token: Option<String>,

    /// Initial page size; one of 10, 20, 50. Default: 20
    pub page_size: u32,

    /// Search debounce window in milliseconds. Default: 500
    pub search_debounce_ms: u64,

    /// Built-in theme name (`walnut`, `linen`). Ignored if `theme_file` is set.
    pub theme: Option<String>,

    /// Path to a custom TOML theme file. `~` is expanded.
    pub theme_file: Option<String>,

    /// Log level: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
            theme: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] for malformed TOML or invalid values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wud_console::Config;
    ///
    /// let config = Config::from_toml("page_size = 50\ntheme = \"linen\"")?;
    /// assert_eq!(config.page_size, 50);
    /// assert_eq!(config.search_debounce_ms, 500);
    /// # Ok::<(), wud_console::ConsoleError>(())
    /// ```
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| ConsoleError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `config.toml` from the configuration directory and applies
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] if the file exists but is invalid.
    pub fn load() -> Result<Self> {
        let path = infrastructure::get_config_dir().join(CONFIG_FILE_NAME);
        Ok(Self::load_from(&path)?.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Loads configuration from `path`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if the file cannot be read, or
    /// [`ConsoleError::Config`] if it is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Applies `WUD_API_URL`, `WUD_API_TOKEN` and `WUD_TRACE_LEVEL`.
    ///
    /// Blank values are ignored.
    #[must_use]
    pub fn with_env_overrides(mut self, env: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup("WUD_API_URL") {
            self.api_url = url;
        }
        if let Some(token) = lookup("WUD_API_TOKEN") {
            self.auth_token = Some(token);
        }
        if let Some(level) = lookup("WUD_TRACE_LEVEL") {
            self.trace_level = Some(level);
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if !PAGE_SIZES.contains(&self.page_size) {
            return Err(ConsoleError::Config(format!(
                "page_size must be one of {PAGE_SIZES:?}, got {}",
                self.page_size
            )));
        }
        if self.api_url.trim().is_empty() {
            return Err(ConsoleError::Config("api_url must not be empty".to_string()));
        }
        Ok(())
    }

    /// Search debounce window.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Theme file path with `~` expanded.
    #[must_use]
    pub fn theme_path(&self) -> Option<PathBuf> {
        self.theme_file
            .as_deref()
            .map(|file| PathBuf::from(infrastructure::expand_tilde(file)))
    }
}

/// Builds the console and theme for a configuration.
///
/// An unknown theme name or unreadable theme file falls back to the default
/// theme.
#[must_use]
pub fn initialize(config: &Config, resource: ResourceKind) -> (Console, Theme) {
    tracing::debug!(resource = %resource, api_url = %config.api_url, "initializing console");

    let theme_path = config.theme_path();
    let theme = Theme::resolve(
        config.theme.as_deref().unwrap_or(ui::theme::BUILTIN_THEMES[0]),
        theme_path.as_deref(),
    )
    .unwrap_or_else(|e| {
        tracing::debug!(error = %e, "failed to load theme, using default");
        Theme::default()
    });

    let console = Console::new(resource, config.page_size, config.debounce());
    (console, theme)
}
