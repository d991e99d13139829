/// clipboard-manager library
///
/// Clipboard history engine: watches the clipboard, stores text snapshots
/// in SQLite, and lets you search, re-copy or delete them.

pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use config::Config;
pub use db::Database;
pub use error::{ClipError, Result};
