//! Background clipboard poller.
//!
//! Samples the system clipboard on a fixed interval and hands every read to
//! a [`ClipboardCaptureHandler`]. Read failures are logged and counted but
//! never stop the loop; only the cancellation token does.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use wt_core::ports::{ClipboardCaptureHandler, ClipboardError, SystemClipboardPort};

/// Consecutive read failures tolerated before the counter starts over.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 5;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The handler recorded a new value.
    Captured,
    /// Read succeeded but the handler ignored the value.
    Unchanged,
    /// Benign platform artifact, tick skipped.
    Skipped,
    /// Read failed; `consecutive` is the counter after this failure.
    Failed { consecutive: u32 },
    /// Read succeeded but the handler returned an error.
    HandlerFailed,
}

pub struct ClipboardPoller {
    clipboard: Arc<dyn SystemClipboardPort>,
    handler: Arc<dyn ClipboardCaptureHandler>,
    period: Duration,
    consecutive_failures: u32,
}

impl ClipboardPoller {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        handler: Arc<dyn ClipboardCaptureHandler>,
        period: Duration,
    ) -> Self {
        // tokio's interval panics on a zero period.
        let period = if period.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            period
        };
        Self {
            clipboard,
            handler,
            period,
            consecutive_failures: 0,
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Run one sample: read the clipboard off the async workers, then offer
    /// the value to the handler.
    pub async fn poll_once(&mut self) -> PollOutcome {
        let clipboard = self.clipboard.clone();
        let read = tokio::task::spawn_blocking(move || clipboard.read_text())
            .await
            .unwrap_or_else(|join_err| Err(ClipboardError::Access(join_err.to_string())));

        let content = match read {
            Ok(content) => content,
            Err(ClipboardError::Spurious) => return PollOutcome::Skipped,
            Err(err) => {
                self.consecutive_failures += 1;
                let consecutive = self.consecutive_failures;
                debug!(error = %err, consecutive, "clipboard read failed");
                if self.consecutive_failures > MAX_CONSECUTIVE_FAILURES {
                    warn!(error = %err, "clipboard unreadable for several ticks; resetting failure count");
                    self.consecutive_failures = 0;
                }
                return PollOutcome::Failed { consecutive };
            }
        };

        self.consecutive_failures = 0;

        match self.handler.on_capture(content) {
            Ok(true) => PollOutcome::Captured,
            Ok(false) => PollOutcome::Unchanged,
            Err(err) => {
                error!(error = %err, "failed to record clipboard capture");
                PollOutcome::HandlerFailed
            }
        }
    }

    /// Poll until `shutdown` is cancelled.
    pub async fn run(mut self, shutdown: CancellationToken) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(period_ms = self.period.as_millis() as u64, "clipboard poller started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
            }
        }

        info!("clipboard poller stopped");
    }
}
