use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clipnotes::domain::Note;
use clipnotes::infrastructure::JsonNoteStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture for working with a temporary notes directory
#[allow(dead_code)]
pub struct TestNotesDir {
    _temp_dir: TempDir,
    pub notes_dir: PathBuf,
}

impl TestNotesDir {
    /// Create an empty notes directory
    pub fn empty() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let notes_dir = temp_dir.path().join("notes");
        std::fs::create_dir_all(&notes_dir).context("Failed to create notes directory")?;

        Ok(Self {
            _temp_dir: temp_dir,
            notes_dir,
        })
    }

    /// Create a notes directory seeded with the known test notes
    pub fn new() -> Result<Self> {
        let fixture = Self::empty()?;
        for note in test_notes::all() {
            write_note(&fixture.notes_dir, &note)?;
        }
        Ok(fixture)
    }

    /// Open a store over this directory
    pub fn open_store(&self) -> Result<JsonNoteStore> {
        JsonNoteStore::open(&self.notes_dir)
    }

    pub fn note_file(&self, id: &str) -> PathBuf {
        self.notes_dir.join(format!("{}.json", id))
    }
}

fn write_note(dir: &Path, note: &Note) -> Result<()> {
    let json = serde_json::to_string_pretty(note)?;
    std::fs::write(dir.join(format!("{}.json", note.id)), json)
        .with_context(|| format!("Failed to write fixture note {}", note.id))
}

/// Known test notes written into every seeded fixture
#[allow(dead_code)]
pub mod test_notes {
    use super::*;

    // Empty note, the typical target for clipboard capture
    pub const BLANK: &str = "note_1714564800000";
    // Note with content and two links
    pub const TRIP: &str = "note_1714651200000";
    // Note with fenced code in its content
    pub const SNIPPETS: &str = "note_1714737600000";

    // For testing error cases
    pub const NONEXISTENT: &str = "note_999";

    pub fn all() -> Vec<Note> {
        vec![
            note(BLANK, "", "", &[], 1),
            note(
                TRIP,
                "Trip to Lisbon",
                "Pack light.",
                &["https://www.visitlisboa.com", "https://maps.google.com/lisbon"],
                2,
            ),
            note(
                SNIPPETS,
                "Rust snippets",
                "```rust\nfn main() {}\n```",
                &[],
                3,
            ),
        ]
    }

    fn note(id: &str, title: &str, content: &str, links: &[&str], day: u32) -> Note {
        let time = Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap();
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            links: links.iter().map(|l| l.to_string()).collect(),
            created_at: time,
            updated_at: time,
            tags: Vec::new(),
            capture_type: None,
            source_app: None,
            window_title: None,
        }
    }
}
