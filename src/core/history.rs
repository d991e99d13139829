/// History browser
///
/// What the user-facing side needs: list, search, copy back, delete, clear.

use crate::core::clipboard::ClipboardSource;
use crate::db::{ClipboardEntry, Database, EntryId};
use crate::error::{ClipError, Result};
use std::sync::Arc;
use tracing::info;

/// Handles history browsing and maintenance
pub struct History {
    db: Arc<Database>,
}

impl History {
    /// Create a new history instance
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Most recent entries
    pub async fn recent(&self, limit: i64) -> Result<Vec<ClipboardEntry>> {
        self.db.query(None, limit).await
    }

    /// Entries containing `filter` (case-sensitive), most recent first
    pub async fn search(&self, filter: &str, limit: i64) -> Result<Vec<ClipboardEntry>> {
        self.db.query(Some(filter), limit).await
    }

    /// Get entry by ID
    pub async fn get(&self, id: EntryId) -> Result<ClipboardEntry> {
        self.db
            .get_entry(id)
            .await?
            .ok_or(ClipError::EntryNotFound(id))
    }

    /// Put an old entry back on the clipboard
    ///
    /// The content goes back byte for byte, newlines included.
    pub async fn copy_back<S>(&self, id: EntryId, source: &mut S) -> Result<ClipboardEntry>
    where
        S: ClipboardSource + ?Sized,
    {
        let entry = self.get(id).await?;
        self.copy_entry(&entry, source)?;
        Ok(entry)
    }

    /// Put an already looked-up entry on the clipboard
    pub fn copy_entry<S>(&self, entry: &ClipboardEntry, source: &mut S) -> Result<()>
    where
        S: ClipboardSource + ?Sized,
    {
        source.set_text(&entry.content)?;
        info!(id = entry.id, "copied entry back to clipboard");
        Ok(())
    }

    /// Delete the entry with this id
    ///
    /// Deletion goes by content, so every other entry with the same text is
    /// removed too. Returns the number of rows removed.
    pub async fn delete(&self, id: EntryId) -> Result<u64> {
        let entry = self.get(id).await?;
        self.delete_content(&entry.content).await
    }

    /// Delete every entry with exactly this content
    pub async fn delete_content(&self, content: &str) -> Result<u64> {
        let removed = self.db.delete_by_content(content).await?;
        info!(removed, "deleted entries");
        Ok(removed)
    }

    /// Wipe the history. Asking the user first is the caller's job.
    pub async fn clear(&self) -> Result<u64> {
        let removed = self.db.clear().await?;
        info!(removed, "history cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::fake::FakeClipboard;

    async fn setup() -> (History, Arc<Database>) {
        let db = Arc::new(Database::new_test().await.unwrap());
        let history = History::new(Arc::clone(&db));
        (history, db)
    }

    #[tokio::test]
    async fn test_recent_and_search() {
        let (history, db) = setup().await;

        db.append("hello world").await.unwrap();
        db.append("foobar").await.unwrap();

        let recent = history.recent(50).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].content, "foobar");

        let hits = history.search("hello", 50).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "hello world");
    }

    #[tokio::test]
    async fn test_copy_back_round_trip() {
        let (history, db) = setup().await;
        let text = "first line\nsecond line\n\n  indented";
        db.append(text).await.unwrap();

        let entry = history.recent(1).await.unwrap().remove(0);
        let mut clipboard = FakeClipboard::new();
        history.copy_back(entry.id, &mut clipboard).await.unwrap();

        assert_eq!(clipboard.read_text().unwrap().as_deref(), Some(text));
        assert_eq!(clipboard.writes, vec![text.to_string()]);
    }

    #[tokio::test]
    async fn test_copy_back_missing_entry() {
        let (history, _db) = setup().await;
        let mut clipboard = FakeClipboard::new();

        let result = history.copy_back(999, &mut clipboard).await;
        assert!(matches!(result, Err(ClipError::EntryNotFound(999))));
        assert!(clipboard.writes.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_before_copy_leaves_clipboard_alone() {
        let (history, db) = setup().await;
        let id = db.append("real").await.unwrap();
        let mut clipboard = FakeClipboard::with_text("untouched");

        // missing id fails at lookup, nothing reaches the clipboard
        assert!(matches!(history.get(id + 1).await, Err(ClipError::EntryNotFound(_))));
        assert_eq!(clipboard.read_text().unwrap().as_deref(), Some("untouched"));

        let entry = history.get(id).await.unwrap();
        history.copy_entry(&entry, &mut clipboard).unwrap();
        assert_eq!(clipboard.writes, vec!["real".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_by_id_removes_identical_entries() {
        let (history, db) = setup().await;

        let id = db.append("dup").await.unwrap();
        db.append("other").await.unwrap();
        db.append("dup").await.unwrap();

        assert_eq!(history.delete(id).await.unwrap(), 2);

        let left = history.recent(50).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].content, "other");
    }

    #[tokio::test]
    async fn test_delete_missing_id() {
        let (history, _db) = setup().await;
        assert!(matches!(history.delete(7).await, Err(ClipError::EntryNotFound(7))));
    }

    #[tokio::test]
    async fn test_clear() {
        let (history, db) = setup().await;

        db.append("a").await.unwrap();
        db.append("b").await.unwrap();

        assert_eq!(history.clear().await.unwrap(), 2);
        assert!(history.recent(50).await.unwrap().is_empty());
    }
}
