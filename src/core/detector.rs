/// Change detection
///
/// Decides which clipboard changes end up in the history. Only consecutive
/// repeats are dropped: copying A, B, A stores three entries.

use crate::core::clipboard::ClipboardSource;
use crate::db::{Database, EntryId};
use crate::error::Result;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What happened to one clipboard-change event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Monitoring is paused, the clipboard wasn't even read
    Paused,
    /// No text on the clipboard, or it couldn't be read
    NoText,
    /// Only whitespace
    Blank,
    /// Same text as the last stored entry
    Duplicate,
    /// Saved under this id
    Stored(EntryId),
    /// The store rejected the write
    Failed,
}

/// Watches for new clipboard text and appends it to the store
pub struct ChangeDetector {
    db: Arc<Database>,
    last_seen: String,
    paused: bool,
}

impl ChangeDetector {
    /// Create an active detector that hasn't seen anything yet
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            last_seen: String::new(),
            paused: false,
        }
    }

    /// Handle one "clipboard changed" notification
    ///
    /// Never fails: read errors are skipped and storage errors are logged,
    /// so the caller can keep feeding events.
    pub async fn on_clipboard_change<S>(&mut self, source: &mut S) -> Capture
    where
        S: ClipboardSource + ?Sized,
    {
        match self.process_change(source).await {
            Ok(capture) => capture,
            Err(e) => {
                error!(error = %e, "failed to save clipboard entry");
                Capture::Failed
            }
        }
    }

    /// Same as [`on_clipboard_change`](Self::on_clipboard_change) but hands
    /// storage errors back to the caller
    pub async fn process_change<S>(&mut self, source: &mut S) -> Result<Capture>
    where
        S: ClipboardSource + ?Sized,
    {
        if self.paused {
            return Ok(Capture::Paused);
        }

        let text = match source.read_text() {
            Ok(Some(text)) => text,
            Ok(None) => return Ok(Capture::NoText),
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "could not read clipboard, skipping");
                return Ok(Capture::NoText);
            }
            // Still not worth stopping the loop over
            Err(e) => {
                error!(error = %e, "clipboard source failed, skipping");
                return Ok(Capture::NoText);
            }
        };

        if text.trim().is_empty() {
            debug!("ignoring blank clipboard text");
            return Ok(Capture::Blank);
        }

        // Compared untrimmed: "a" and "a " are different copies
        if text == self.last_seen {
            return Ok(Capture::Duplicate);
        }

        self.last_seen = text;
        let id = self.db.append(&self.last_seen).await?;
        info!(id, chars = self.last_seen.chars().count(), "saved clipboard entry");

        Ok(Capture::Stored(id))
    }

    /// Stop capturing until [`resume`](Self::resume)
    pub fn pause(&mut self) {
        if !self.paused {
            info!("monitoring paused");
        }
        self.paused = true;
    }

    /// Start capturing again
    pub fn resume(&mut self) {
        if self.paused {
            info!("monitoring resumed");
        }
        self.paused = false;
    }

    /// Flip pause state, returns true when now paused
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    /// Whether capturing is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Text of the last entry this detector stored
    pub fn last_seen(&self) -> &str {
        &self.last_seen
    }
}
