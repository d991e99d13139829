/// Data models for database entities
///
/// Models map to the `clipboard_history` table and use sqlx for typed rows.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// SQLite `CURRENT_TIMESTAMP` format
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How many characters of an entry a listing shows
const PREVIEW_CHARS: usize = 80;

/// Id assigned by the store on insert
pub type EntryId = i64;

/// One captured clipboard snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ClipboardEntry {
    pub id: EntryId,
    pub content: String,
    pub timestamp: String, // "YYYY-MM-DD HH:MM:SS", UTC, from SQLite
}

impl ClipboardEntry {
    /// Parse the stored timestamp
    pub fn captured_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }

    /// Capture time as `HH:MM:SS`, or the raw value if it doesn't parse
    pub fn time_of_day(&self) -> String {
        self.captured_at()
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| self.timestamp.clone())
    }

    /// Single-line preview for listings
    ///
    /// Truncates on a char boundary and flattens newlines.
    pub fn preview(&self) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
        let preview = if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        };

        preview.replace("\r\n", " ").replace(['\n', '\r'], " ")
    }
}
