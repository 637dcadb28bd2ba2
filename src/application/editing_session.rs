// src/application/editing_session.rs
use crate::application::clipboard_debouncer::{ClipboardDebouncer, ScheduleOutcome};
use crate::content::classifier::{classify_for, Channel};
use crate::domain::url_list::validate_link_field;
use crate::domain::{ClassificationResult, ClipboardSample, Document, DomainError, Note, UrlList};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Typed notifications delivered to session subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ClipboardChanged,
    ClipboardImage {
        data_url: String,
        width: u32,
        height: u32,
    },
    RecentFileOpened(PathBuf),
    ScreenshotDetected,
    TitleChanged(String),
    LinkAdded(String),
    ContentInserted(InsertOutcome),
}

/// What applying a classification did to the note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    LinkAdded(String),
    LinkAlreadyPresent(String),
    CodeBlockInserted { language: Option<String> },
    TextInserted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SessionEvent)>;

/// State of the note currently open for editing.
///
/// Owns the note's links, its document, the clipboard debounce timer and the
/// subscriber list. After [`EditingSession::close`] all input is ignored.
pub struct EditingSession {
    note_id: Option<String>,
    title: String,
    document: Document,
    urls: UrlList,
    debouncer: ClipboardDebouncer,
    monitoring_enabled: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    closed: bool,
}

impl EditingSession {
    /// Session for a note that has not been saved yet
    pub fn new(debounce: Duration) -> Self {
        Self {
            note_id: None,
            title: String::new(),
            document: Document::new(),
            urls: UrlList::new(),
            debouncer: ClipboardDebouncer::new(debounce),
            monitoring_enabled: true,
            listeners: Vec::new(),
            next_subscription: 0,
            closed: false,
        }
    }

    pub fn from_note(note: &Note, debounce: Duration) -> Self {
        let mut session = Self::new(debounce);
        session.note_id = Some(note.id.clone());
        session.title = note.title.clone();
        session.document = Document::from_text(&note.content);
        session.urls = UrlList::from_links(&note.links);
        session
    }

    pub fn note_id(&self) -> Option<&str> {
        self.note_id.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn urls(&self) -> &UrlList {
        &self.urls
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_monitoring_enabled(&mut self, enabled: bool) {
        self.monitoring_enabled = enabled;
        if !enabled {
            self.debouncer.cancel();
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to the listeners registered right now. No replay.
    pub fn notify(&mut self, event: SessionEvent) {
        if self.closed {
            return;
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Feed an external clipboard-change notification into the debounce timer.
    pub fn on_clipboard_changed(&mut self, sample: ClipboardSample) -> Option<ScheduleOutcome> {
        if self.closed || !self.monitoring_enabled {
            debug!("Clipboard monitoring inactive, ignoring sample");
            return None;
        }

        let outcome = self.debouncer.schedule(sample);
        if matches!(outcome, ScheduleOutcome::Scheduled | ScheduleOutcome::Superseded) {
            self.notify(SessionEvent::ClipboardChanged);
        }
        Some(outcome)
    }

    /// When the pending clipboard sample becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Drive the debounce timer; classifies and applies the sample once due.
    pub fn tick(&mut self, now: Instant) -> Option<InsertOutcome> {
        if self.closed {
            return None;
        }
        let text = self.debouncer.poll(now)?;
        let result = classify_for(Channel::ClipboardCapture, &text);
        Some(self.apply(result))
    }

    pub fn paste(&mut self, text: &str) -> Option<InsertOutcome> {
        self.insert_from(Channel::EditorPaste, text)
    }

    pub fn drop_text(&mut self, text: &str) -> Option<InsertOutcome> {
        self.insert_from(Channel::EditorDrop, text)
    }

    fn insert_from(&mut self, channel: Channel, text: &str) -> Option<InsertOutcome> {
        if self.closed || text.is_empty() {
            return None;
        }
        let result = classify_for(channel, text);
        Some(self.apply(result))
    }

    /// Merge a classification into the note.
    pub fn apply(&mut self, result: ClassificationResult) -> InsertOutcome {
        let outcome = match result {
            ClassificationResult::Url { url } => {
                if self.urls.add(&url) {
                    info!(url = %url, "Added URL to links");
                    self.notify(SessionEvent::LinkAdded(url.clone()));
                    InsertOutcome::LinkAdded(url)
                } else {
                    debug!(url = %url, "URL already exists in links");
                    InsertOutcome::LinkAlreadyPresent(url)
                }
            }
            ClassificationResult::CodeBlock { language, body } => {
                self.document.insert_code_block(language.as_deref(), &body);
                InsertOutcome::CodeBlockInserted { language }
            }
            ClassificationResult::PlainText { body } => {
                self.document.insert_text(&body);
                InsertOutcome::TextInserted
            }
        };

        if !matches!(outcome, InsertOutcome::LinkAdded(_) | InsertOutcome::LinkAlreadyPresent(_)) {
            self.notify(SessionEvent::ContentInserted(outcome.clone()));
        }
        outcome
    }

    pub fn set_title(&mut self, title: &str) {
        if self.closed || self.title == title {
            return;
        }
        self.title = title.to_string();
        self.notify(SessionEvent::TitleChanged(self.title.clone()));
    }

    /// Replace the links with a hand-edited link field.
    ///
    /// Invalid input leaves the current links untouched.
    pub fn set_link_field(&mut self, value: &str) -> Result<(), DomainError> {
        let urls = validate_link_field(value)?;
        self.urls = urls;
        Ok(())
    }

    /// Title, content and links ready to hand to the note repository.
    pub fn draft(&self) -> (String, String, Vec<String>) {
        (
            self.title.clone(),
            self.document.to_text(),
            self.urls.clone().into_vec(),
        )
    }

    /// Tear down: drop every listener and the pending clipboard sample.
    pub fn close(&mut self) {
        self.listeners.clear();
        self.debouncer.cancel();
        self.closed = true;
        debug!(note_id = ?self.note_id, "Editing session closed");
    }
}

impl Drop for EditingSession {
    fn drop(&mut self) {
        if !self.closed {
            self.close();
        }
    }
}
