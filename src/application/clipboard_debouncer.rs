// src/application/clipboard_debouncer.rs
use crate::constants::CLIPBOARD_DEBOUNCE_MS;
use crate::domain::ClipboardSample;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Why `schedule` did or did not arm the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled,
    /// A pending sample was replaced by this one
    Superseded,
    IgnoredFromApp,
    IgnoredBlank,
}

struct Pending {
    text: String,
    deadline: Instant,
}

/// Single-slot debounce timer for clipboard-change notifications.
///
/// Holds at most one pending sample; a newer sample always replaces it.
/// Nothing fires by itself: the owner calls [`ClipboardDebouncer::poll`]
/// from its event loop.
pub struct ClipboardDebouncer {
    delay: Duration,
    pending: Option<Pending>,
    last_processed: Option<String>,
}

impl ClipboardDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_processed: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending sample becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn schedule(&mut self, sample: ClipboardSample) -> ScheduleOutcome {
        if sample.originated_from_app {
            trace!("Ignoring app-originated clipboard content");
            return ScheduleOutcome::IgnoredFromApp;
        }

        let text = sample.text.trim();
        if text.is_empty() {
            return ScheduleOutcome::IgnoredBlank;
        }

        let superseded = self.pending.is_some();
        self.pending = Some(Pending {
            text: text.to_string(),
            deadline: sample.observed_at + self.delay,
        });

        if superseded {
            ScheduleOutcome::Superseded
        } else {
            ScheduleOutcome::Scheduled
        }
    }

    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            debug!("Cancelled pending clipboard sample");
        }
    }

    /// Fire the timer if it is due at `now`.
    ///
    /// Returns the text to classify, or `None` when nothing is due or the text
    /// repeats the last processed one.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline);
        if !due {
            return None;
        }

        let pending = self.pending.take()?;
        if self.last_processed.as_deref() == Some(pending.text.as_str()) {
            debug!("Already processed this clipboard content");
            return None;
        }

        self.last_processed = Some(pending.text.clone());
        Some(pending.text)
    }
}

impl Default for ClipboardDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(CLIPBOARD_DEBOUNCE_MS))
    }
}
