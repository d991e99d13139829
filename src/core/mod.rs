/// Core functionality modules
///
/// Contains the clipboard history engine: change detection, the watcher
/// loop that drives it, and the history browser.

pub mod clipboard;
pub mod detector;
pub mod history;
pub mod watcher;

pub use clipboard::{ClipboardSource, SystemClipboard};
pub use detector::{Capture, ChangeDetector};
pub use history::History;
pub use watcher::{Control, Watcher};
