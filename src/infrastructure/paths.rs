//! Platform directory resolution.
//!
//! Configuration lives under the user's config directory and runtime data
//! (favorites document, log files) under the data directory, both in a
//! `moviedeck` subdirectory:
//!
//! | Platform | Config                                   | Data                                         |
//! |----------|------------------------------------------|----------------------------------------------|
//! | Linux    | `~/.config/moviedeck`                    | `~/.local/share/moviedeck`                   |
//! | macOS    | `~/Library/Application Support/moviedeck`| `~/Library/Application Support/moviedeck`    |
//! | Windows  | `%APPDATA%\moviedeck`                    | `%APPDATA%\moviedeck`                        |

use std::path::{Path, PathBuf};

const APP_DIR: &str = "moviedeck";
const CONFIG_FILE: &str = "config.toml";

/// Directory holding `config.toml`, if the platform has a config directory.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Location of the configuration file.
#[must_use]
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Default data directory.
///
/// Falls back to `./.moviedeck` when the platform reports no data or home
/// directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .map_or_else(|| PathBuf::from(".moviedeck"), |dir| dir.join(APP_DIR))
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, or with no resolvable home directory, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_leaves_other_paths_alone() {
        assert_eq!(expand_tilde(Path::new("/tmp/deck")), PathBuf::from("/tmp/deck"));
        assert_eq!(expand_tilde(Path::new("data/~")), PathBuf::from("data/~"));
    }

    #[test]
    fn expand_tilde_uses_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/movies")), home.join("movies"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }

    #[test]
    fn data_dir_ends_in_app_dir() {
        assert!(default_data_dir().ends_with(APP_DIR) || default_data_dir().ends_with(".moviedeck"));
    }
}
