// src/application/mod.rs
pub mod clipboard_debouncer;
pub mod clipboard_history;
pub mod editing_session;
pub mod note_deleter;
pub mod note_exporter;
pub mod note_lister;
pub mod note_viewer;
pub mod note_writer;

pub use clipboard_debouncer::{ClipboardDebouncer, ScheduleOutcome};
pub use clipboard_history::{Capture, ClipboardHistory, HistorySettings, RecordOutcome};
pub use editing_session::{EditingSession, InsertOutcome, SessionEvent, SubscriptionId};
pub use note_deleter::NoteDeleter;
pub use note_exporter::{MarkdownExport, NoteExporter};
pub use note_lister::NoteLister;
pub use note_viewer::{NoteRepository, NoteViewer};
pub use note_writer::NoteWriter;
