/// SQL query functions for history operations
///
/// Each function is a single statement, so each one is atomic on its own.

use crate::db::models::*;
use crate::db::Database;
use crate::error::Result;
use sqlx::Row;

impl Database {
    /// Append a snapshot to the history
    ///
    /// The content is stored verbatim; the timestamp comes from SQLite's
    /// clock, never from the caller.
    ///
    /// # Returns
    /// * `Ok(EntryId)` - The new entry's id
    /// * `Err(ClipError::Storage)` - If the insert fails
    pub async fn append(&self, content: &str) -> Result<EntryId> {
        let result = sqlx::query("INSERT INTO clipboard_history (content) VALUES (?) RETURNING id")
            .bind(content)
            .fetch_one(self.pool())
            .await?;

        Ok(result.get(0))
    }

    /// List entries, most recent first
    ///
    /// # Arguments
    /// * `filter` - Optional case-sensitive substring; empty means no filter
    /// * `limit` - Maximum number of entries to return
    ///
    /// Ties on the second-resolution timestamp are broken by id, newest first.
    /// `instr` is used rather than `LIKE` so `%` and `_` match literally and
    /// case is respected.
    pub async fn query(&self, filter: Option<&str>, limit: i64) -> Result<Vec<ClipboardEntry>> {
        let entries = match filter.filter(|f| !f.is_empty()) {
            Some(needle) => {
                sqlx::query_as::<_, ClipboardEntry>(
                    "SELECT id, content, timestamp FROM clipboard_history \
                     WHERE instr(content, ?) > 0 \
                     ORDER BY timestamp DESC, id DESC LIMIT ?",
                )
                .bind(needle)
                .bind(limit)
                .fetch_all(self.pool())
                .await?
            }
            None => {
                sqlx::query_as::<_, ClipboardEntry>(
                    "SELECT id, content, timestamp FROM clipboard_history \
                     ORDER BY timestamp DESC, id DESC LIMIT ?",
                )
                .bind(limit)
                .fetch_all(self.pool())
                .await?
            }
        };

        Ok(entries)
    }

    /// Get entry by ID
    pub async fn get_entry(&self, id: EntryId) -> Result<Option<ClipboardEntry>> {
        let entry = sqlx::query_as::<_, ClipboardEntry>(
            "SELECT id, content, timestamp FROM clipboard_history WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(entry)
    }

    /// Delete every entry whose content equals `content` exactly
    ///
    /// Content isn't unique, so this can remove several rows at once.
    /// Returns how many were removed.
    pub async fn delete_by_content(&self, content: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM clipboard_history WHERE content = ?")
            .bind(content)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected())
    }

    /// Remove the whole history
    pub async fn clear(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM clipboard_history")
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected())
    }

    /// Number of stored entries
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clipboard_history")
            .fetch_one(self.pool())
            .await?;

        Ok(count)
    }
}
