//! Platform paths for configuration and data.
//!
//! Directories follow the XDG base directory layout:
//!
//! - config: `$XDG_CONFIG_HOME/wud-console`, else `~/.config/wud-console`
//! - data: `$XDG_DATA_HOME/wud-console`, else `~/.local/share/wud-console`
//!
//! The `*_from` variants take an environment lookup so they can be tested
//! without touching the process environment.

use std::path::PathBuf;

const APP_DIR: &str = "wud-console";

/// Returns the data directory (log files).
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(|key| std::env::var(key).ok())
}

/// Returns the configuration directory (`config.toml`).
#[must_use]
pub fn get_config_dir() -> PathBuf {
    config_dir_from(|key| std::env::var(key).ok())
}

/// Resolves the data directory with a custom environment lookup.
#[must_use]
pub fn data_dir_from(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    base_dir(&env, "XDG_DATA_HOME", &[".local", "share"]).join(APP_DIR)
}

/// Resolves the configuration directory with a custom environment lookup.
#[must_use]
pub fn config_dir_from(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    base_dir(&env, "XDG_CONFIG_HOME", &[".config"]).join(APP_DIR)
}

fn base_dir(env: &impl Fn(&str) -> Option<String>, xdg_var: &str, fallback: &[&str]) -> PathBuf {
    if let Some(dir) = env(xdg_var).filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }

    let mut path = env("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
    path.extend(fallback);
    path
}

/// Expands a leading `~` to the user's home directory.
///
/// # Examples
///
/// ```
/// use wud_console::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };

    if path == "~" {
        home.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}
