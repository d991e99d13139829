/// Runtime configuration
///
/// Resolves where the history lives and how the watcher behaves.
/// The only environment variable consulted is `XDG_DATA_HOME`.

use crate::error::{ClipError, Result};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name under the data home
pub const APP_DIR_NAME: &str = "clipboard-manager";

/// Database file name inside the app directory
pub const DB_FILE_NAME: &str = "history.db";

/// How many entries a listing shows unless told otherwise
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// Default poll interval for the watcher
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

// Anything faster just burns CPU on clipboard round-trips
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub poll_interval: Duration,
    pub history_limit: i64,
}

impl Config {
    /// Build the config from the environment
    ///
    /// Uses `$XDG_DATA_HOME` when it is set to an absolute path (relative
    /// values are ignored, as the XDG spec asks), otherwise `~/.local/share`.
    pub fn from_env() -> Result<Self> {
        let data_home = resolve_data_home(env::var_os("XDG_DATA_HOME"), dirs::home_dir())?;
        Ok(Self::with_data_home(data_home))
    }

    /// Build a config rooted at an explicit data home
    pub fn with_data_home<P: AsRef<Path>>(data_home: P) -> Self {
        let data_dir = data_home.as_ref().join(APP_DIR_NAME);
        let db_path = data_dir.join(DB_FILE_NAME);

        Self {
            data_dir,
            db_path,
            poll_interval: DEFAULT_POLL_INTERVAL,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Override the poll interval, clamped to a sane minimum
    pub fn poll_interval_ms(mut self, millis: u64) -> Self {
        self.poll_interval = Duration::from_millis(millis).max(MIN_POLL_INTERVAL);
        self
    }
}

/// Pick the data home from `$XDG_DATA_HOME` and the home directory
fn resolve_data_home(xdg: Option<OsString>, home: Option<PathBuf>) -> Result<PathBuf> {
    match xdg.map(PathBuf::from) {
        Some(path) if path.is_absolute() => Ok(path),
        _ => home
            .map(|home| home.join(".local").join("share"))
            .ok_or_else(|| ClipError::Config("could not find home directory".to_string())),
    }
}

/// Parse a user-supplied listing limit
///
/// SQLite reads a negative LIMIT as "no limit", so only positive values pass.
pub fn parse_limit(raw: &str) -> Result<i64> {
    match raw.parse::<i64>() {
        Ok(limit) if limit >= 1 => Ok(limit),
        _ => Err(ClipError::Config(format!(
            "limit must be a positive number, got '{}'",
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_under_data_home() {
        let config = Config::with_data_home("/tmp/data");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/data/clipboard-manager"));
        assert_eq!(
            config.db_path,
            PathBuf::from("/tmp/data/clipboard-manager/history.db")
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::with_data_home("/tmp/data");
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.history_limit, 50);
    }

    #[test]
    fn test_absolute_xdg_data_home_wins() {
        let home = resolve_data_home(
            Some(OsString::from("/srv/xdg")),
            Some(PathBuf::from("/home/me")),
        )
        .unwrap();
        assert_eq!(home, PathBuf::from("/srv/xdg"));
    }

    #[test]
    fn test_relative_xdg_data_home_ignored() {
        let home = resolve_data_home(
            Some(OsString::from("relative/data")),
            Some(PathBuf::from("/home/me")),
        )
        .unwrap();
        assert_eq!(home, PathBuf::from("/home/me/.local/share"));
    }

    #[test]
    fn test_unset_xdg_falls_back_to_local_share() {
        let home = resolve_data_home(None, Some(PathBuf::from("/home/me"))).unwrap();
        assert_eq!(home, PathBuf::from("/home/me/.local/share"));
    }

    #[test]
    fn test_no_home_directory() {
        let result = resolve_data_home(None, None);
        assert!(matches!(result, Err(ClipError::Config(_))));
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit("20").unwrap(), 20);
        assert_eq!(parse_limit("1").unwrap(), 1);
        assert!(matches!(parse_limit("0"), Err(ClipError::Config(_))));
        assert!(matches!(parse_limit("-1"), Err(ClipError::Config(_))));
        assert!(matches!(parse_limit("lots"), Err(ClipError::Config(_))));
    }

    #[test]
    fn test_poll_interval_clamped() {
        let config = Config::with_data_home("/tmp").poll_interval_ms(1);
        assert_eq!(config.poll_interval, MIN_POLL_INTERVAL);

        let config = Config::with_data_home("/tmp").poll_interval_ms(2000);
        assert_eq!(config.poll_interval, Duration::from_secs(2));
    }
}
