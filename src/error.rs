/// Error types for clipboard-manager
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for clipboard-manager operations
#[derive(Error, Debug)]
pub enum ClipError {
    /// Database-related errors (the store is unusable for this operation)
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// I/O errors (data directory, confirmation prompt, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The clipboard could not be read right now
    #[error("Clipboard read error: {0}")]
    ClipboardRead(String),

    /// Writing back to the clipboard failed
    #[error("Clipboard write error: {0}")]
    ClipboardWrite(String),

    /// No system clipboard could be opened
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// No history entry with this id
    #[error("Entry not found: {0}")]
    EntryNotFound(i64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error (JSON output)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for clipboard-manager operations
pub type Result<T> = std::result::Result<T, ClipError>;

impl ClipError {
    /// Errors the watcher can shrug off and retry on the next tick
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ClipError::ClipboardRead(_))
    }

    /// Convert ClipError to a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ClipError::Storage(e) => {
                format!("History database error. Please try again. Details: {}", e)
            }
            ClipError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            ClipError::ClipboardRead(msg) => {
                format!("Could not read the clipboard: {}", msg)
            }
            ClipError::ClipboardWrite(msg) => {
                format!("Could not copy to the clipboard: {}", msg)
            }
            ClipError::ClipboardUnavailable(msg) => {
                format!("No clipboard available (is a display running?): {}", msg)
            }
            ClipError::EntryNotFound(id) => {
                format!("No history entry with id {}", id)
            }
            ClipError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            ClipError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
        }
    }
}
