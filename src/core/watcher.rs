/// Clipboard watcher loop
///
/// Turns a poll tick into a "clipboard changed" notification for the
/// detector. Pause/resume requests and shutdown are handled on the same
/// task, so the detector is never touched concurrently.

use crate::core::clipboard::ClipboardSource;
use crate::core::detector::{Capture, ChangeDetector};
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

/// Requests the outside world can send to a running watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Pause,
    Resume,
    Toggle,
}

/// Polls a clipboard source and feeds a detector
pub struct Watcher<S> {
    detector: ChangeDetector,
    source: S,
    poll_interval: Duration,
}

impl<S: ClipboardSource> Watcher<S> {
    /// Create a watcher polling `source` every `poll_interval`
    pub fn new(detector: ChangeDetector, source: S, poll_interval: Duration) -> Self {
        Self {
            detector,
            source,
            poll_interval,
        }
    }

    /// Check the clipboard once
    pub async fn tick(&mut self) -> Capture {
        self.detector.on_clipboard_change(&mut self.source).await
    }

    /// Apply a control request
    pub fn apply(&mut self, control: Control) {
        match control {
            Control::Pause => self.detector.pause(),
            Control::Resume => self.detector.resume(),
            Control::Toggle => {
                self.detector.toggle_pause();
            }
        }
    }

    /// The detector being driven
    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    /// Run until `shutdown` completes
    ///
    /// Returns the detector so its final state can be inspected. If the
    /// control channel closes the watcher keeps running on ticks alone.
    pub async fn run<F>(mut self, mut controls: mpsc::Receiver<Control>, shutdown: F) -> ChangeDetector
    where
        F: Future<Output = ()>,
    {
        let mut ticker = time::interval(self.poll_interval);
        // A slow clipboard read shouldn't cause a burst of catch-up reads
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(shutdown);
        let mut controls_open = true;

        info!(interval_ms = self.poll_interval.as_millis() as u64, "watching clipboard");

        loop {
            tokio::select! {
                // shutdown, then controls, then ticks
                biased;

                _ = &mut shutdown => break,
                control = controls.recv(), if controls_open => match control {
                    Some(control) => self.apply(control),
                    None => controls_open = false,
                },
                _ = ticker.tick() => {
                    let capture = self.tick().await;
                    debug!(?capture, "tick");
                }
            }
        }

        info!("watcher stopped");
        self.detector
    }
}
