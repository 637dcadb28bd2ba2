// src/util/testing.rs

use anyhow::Result;
use chrono::{TimeZone, Utc};
use std::collections::HashSet;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NoteRepository;
use crate::domain::{DomainError, Note, NoteMetadata};

/// Note with fixed timestamps and no links, for tests
pub fn sample_note(id: &str, title: &str) -> Note {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().unwrap_or_default();
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: String::new(),
        links: vec![],
        created_at: created,
        updated_at: created,
        tags: Vec::new(),
        capture_type: None,
        source_app: None,
        window_title: None,
    }
}

/// Shared in-memory repository for testing use cases that depend on NoteRepository
///
/// # Examples
///
/// ```
/// use clipnotes::application::NoteRepository;
/// use clipnotes::util::testing::{sample_note, MockNoteRepository};
///
/// let mut mock = MockNoteRepository::builder()
///     .with_note(sample_note("note_1", "Question"))
///     .with_failing_writes("note_2")
///     .build();
/// assert_eq!(mock.get_note("note_1").unwrap().title, "Question");
/// ```
pub struct MockNoteRepository {
    notes: Vec<Note>,
    failing_writes: HashSet<String>,
    next_id: u64,
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    fn position(&self, id: &str) -> Result<usize, DomainError> {
        self.notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))
    }
}

impl NoteRepository for MockNoteRepository {
    fn get_note(&mut self, id: &str) -> Result<Note, DomainError> {
        let index = self.position(id)?;
        Ok(self.notes[index].clone())
    }

    fn list_notes(&mut self) -> Result<Vec<NoteMetadata>, DomainError> {
        Ok(self.notes.iter().map(Note::metadata).collect())
    }

    fn save_note(&mut self, title: &str, content: &str, links: &[String]) -> Result<String, DomainError> {
        self.next_id += 1;
        let mut note = sample_note(&format!("note_{}", self.next_id), title);
        note.content = content.to_string();
        note.links = links.to_vec();
        let id = note.id.clone();
        self.notes.push(note);
        Ok(id)
    }

    fn update_note(
        &mut self,
        id: &str,
        title: &str,
        content: &str,
        links: &[String],
    ) -> Result<(), DomainError> {
        if self.failing_writes.contains(id) {
            return Err(DomainError::Storage(format!("write failed for {}", id)));
        }
        let index = self.position(id)?;
        let note = &mut self.notes[index];
        note.title = title.to_string();
        note.content = content.to_string();
        note.links = links.to_vec();
        Ok(())
    }

    fn delete_note(&mut self, id: &str) -> Result<(), DomainError> {
        let index = self.position(id)?;
        self.notes.remove(index);
        Ok(())
    }
}

/// Builder for MockNoteRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNoteRepositoryBuilder {
    notes: Vec<Note>,
    failing_writes: HashSet<String>,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            notes: vec![],
            failing_writes: HashSet::new(),
        }
    }

    /// Add a note that can be retrieved by get_note
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Make update_note fail with a storage error for a specific ID
    pub fn with_failing_writes(mut self, id: &str) -> Self {
        self.failing_writes.insert(id.to_string());
        self
    }

    pub fn build(self) -> MockNoteRepository {
        MockNoteRepository {
            notes: self.notes,
            failing_writes: self.failing_writes,
            next_id: 0,
        }
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["regex", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
