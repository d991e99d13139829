/// Clipboard access
///
/// The core only ever needs two things from a clipboard: read the current text
/// and, for copy-back, replace it. Anything that can do that can drive history.

use crate::error::{ClipError, Result};

/// Something that holds text the user copied
pub trait ClipboardSource {
    /// Current clipboard text, `None` when the clipboard holds no text
    fn read_text(&mut self) -> Result<Option<String>>;

    /// Replace the clipboard contents with `text`
    fn set_text(&mut self, text: &str) -> Result<()>;
}

impl<T: ClipboardSource + ?Sized> ClipboardSource for Box<T> {
    fn read_text(&mut self) -> Result<Option<String>> {
        (**self).read_text()
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        (**self).set_text(text)
    }
}

/// The real system clipboard, via arboard
pub struct SystemClipboard {
    clipboard: arboard::Clipboard,
}

impl SystemClipboard {
    /// Open the system clipboard
    pub fn new() -> Result<Self> {
        let clipboard = arboard::Clipboard::new()
            .map_err(|e| ClipError::ClipboardUnavailable(e.to_string()))?;
        Ok(Self { clipboard })
    }
}

impl ClipboardSource for SystemClipboard {
    fn read_text(&mut self) -> Result<Option<String>> {
        match self.clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            // Empty clipboard or an image, nothing for us
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(ClipError::ClipboardRead(e.to_string())),
        }
    }

    #[cfg(target_os = "linux")]
    fn set_text(&mut self, text: &str) -> Result<()> {
        use arboard::SetExtLinux;

        // On X11/Wayland the selection dies with its owner, so keep serving
        // it until another program takes over.
        self.clipboard
            .set()
            .wait()
            .text(text.to_string())
            .map_err(|e| ClipError::ClipboardWrite(e.to_string()))
    }

    #[cfg(not(target_os = "linux"))]
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipError::ClipboardWrite(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::VecDeque;

    /// In-memory clipboard with scripted failures
    #[derive(Default)]
    pub struct FakeClipboard {
        current: Option<String>,
        failing_reads: usize,
        broken_reads: usize,
        pub reads: usize,
        pub writes: Vec<String>,
        queued: VecDeque<Option<String>>,
    }

    impl FakeClipboard {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_text(text: &str) -> Self {
            Self {
                current: Some(text.to_string()),
                ..Self::default()
            }
        }

        /// Simulate the user copying `text`
        pub fn copy(&mut self, text: &str) {
            self.current = Some(text.to_string());
        }

        /// Simulate non-text content (image, empty selection)
        pub fn copy_non_text(&mut self) {
            self.current = None;
        }

        /// Make the next `n` reads fail
        pub fn fail_reads(&mut self, n: usize) {
            self.failing_reads = n;
        }

        /// Make the next `n` reads fail as if the clipboard were gone
        pub fn break_source(&mut self, n: usize) {
            self.broken_reads = n;
        }

        /// Values handed out on successive reads before falling back to `current`
        pub fn queue(&mut self, values: &[Option<&str>]) {
            self.queued
                .extend(values.iter().map(|v| v.map(str::to_string)));
        }
    }

    impl ClipboardSource for FakeClipboard {
        fn read_text(&mut self) -> Result<Option<String>> {
            self.reads += 1;
            if self.broken_reads > 0 {
                self.broken_reads -= 1;
                return Err(ClipError::ClipboardUnavailable("display closed".to_string()));
            }
            if self.failing_reads > 0 {
                self.failing_reads -= 1;
                return Err(ClipError::ClipboardRead("owner went away".to_string()));
            }
            if let Some(next) = self.queued.pop_front() {
                self.current = next;
            }
            Ok(self.current.clone())
        }

        fn set_text(&mut self, text: &str) -> Result<()> {
            self.writes.push(text.to_string());
            self.current = Some(text.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeClipboard;
    use super::*;

    #[test]
    fn test_fake_round_trip() {
        let mut clipboard = FakeClipboard::new();
        assert_eq!(clipboard.read_text().unwrap(), None);

        clipboard.set_text("line 1\nline 2").unwrap();
        assert_eq!(clipboard.read_text().unwrap().as_deref(), Some("line 1\nline 2"));
    }

    #[test]
    fn test_fake_failures_then_recovers() {
        let mut clipboard = FakeClipboard::with_text("x");
        clipboard.fail_reads(1);

        assert!(clipboard.read_text().unwrap_err().is_recoverable());
        assert_eq!(clipboard.read_text().unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_boxed_source_delegates() {
        let mut boxed: Box<dyn ClipboardSource> = Box::new(FakeClipboard::with_text("boxed"));
        assert_eq!(boxed.read_text().unwrap().as_deref(), Some("boxed"));
    }
}
