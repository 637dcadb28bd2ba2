// src/infrastructure/json_store.rs
use crate::application::NoteRepository;
use crate::domain::{ClipboardHistoryEntry, ClipboardState, DomainError, Note, NoteMetadata, SidebarState};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

const APP_DATA_DIR: &str = "app_data";
const SIDEBAR_STATE_FILE: &str = "sidebar_state.json";
const CLIPBOARD_HISTORY_FILE: &str = "clipboard_history.json";
const CLIPBOARD_STATE_FILE: &str = "clipboard_state.json";

/// Note store keeping one pretty-printed JSON file per note.
///
/// All notes are read once on open and kept in memory, most recently updated first.
pub struct JsonNoteStore {
    notes_dir: PathBuf,
    notes: Vec<Note>,
}

impl JsonNoteStore {
    pub fn open<P: AsRef<Path>>(notes_dir: P) -> Result<Self> {
        let notes_dir = notes_dir.as_ref().to_path_buf();
        fs::create_dir_all(notes_dir.join(APP_DATA_DIR))
            .with_context(|| format!("Failed to create notes directory: {}", notes_dir.display()))?;

        let mut notes = Vec::new();
        for entry in fs::read_dir(&notes_dir).context("Failed to read notes directory")? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match read_json::<Note>(&path) {
                Ok(note) => notes.push(note),
                Err(e) => warn!(?path, error = %e, "Skipping unreadable note file"),
            }
        }
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        info!(count = notes.len(), dir = ?notes_dir, "Loaded notes from disk");
        Ok(Self { notes_dir, notes })
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    fn note_path(&self, id: &str) -> PathBuf {
        self.notes_dir.join(format!("{}.json", id))
    }

    fn app_data_path(&self, file: &str) -> PathBuf {
        self.notes_dir.join(APP_DATA_DIR).join(file)
    }

    fn write_note(&self, note: &Note) -> Result<(), DomainError> {
        write_json(&self.note_path(&note.id), note).map_err(storage_error)
    }

    fn next_id(&self) -> String {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let id = format!("note_{}", millis);
            if !self.notes.iter().any(|n| n.id == id) {
                return id;
            }
            millis += 1;
        }
    }

    pub fn load_sidebar_state(&self) -> Result<Option<SidebarState>> {
        let path = self.app_data_path(SIDEBAR_STATE_FILE);
        if !path.exists() {
            debug!("No sidebar state file found");
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    pub fn save_sidebar_state(&self, state: &SidebarState) -> Result<()> {
        write_json(&self.app_data_path(SIDEBAR_STATE_FILE), state)
    }

    pub fn load_clipboard_history(&self) -> Result<Vec<ClipboardHistoryEntry>> {
        let path = self.app_data_path(CLIPBOARD_HISTORY_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        read_json(&path)
    }

    pub fn save_clipboard_history(&self, entries: &[ClipboardHistoryEntry]) -> Result<()> {
        write_json(&self.app_data_path(CLIPBOARD_HISTORY_FILE), &entries)
    }

    pub fn load_clipboard_state(&self) -> Result<ClipboardState> {
        let path = self.app_data_path(CLIPBOARD_STATE_FILE);
        if !path.exists() {
            return Ok(ClipboardState::default());
        }
        read_json(&path)
    }

    pub fn save_clipboard_state(&self, state: &ClipboardState) -> Result<()> {
        write_json(&self.app_data_path(CLIPBOARD_STATE_FILE), state)
    }
}

impl NoteRepository for JsonNoteStore {
    fn get_note(&mut self, id: &str) -> Result<Note, DomainError> {
        self.notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))
    }

    fn list_notes(&mut self) -> Result<Vec<NoteMetadata>, DomainError> {
        Ok(self.notes.iter().map(Note::metadata).collect())
    }

    #[instrument(level = "debug", skip(self, content, links))]
    fn save_note(&mut self, title: &str, content: &str, links: &[String]) -> Result<String, DomainError> {
        let now = Utc::now();
        let note = Note {
            id: self.next_id(),
            title: title.to_string(),
            content: content.to_string(),
            links: links.to_vec(),
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
            capture_type: None,
            source_app: None,
            window_title: None,
        };
        self.write_note(&note)?;

        let id = note.id.clone();
        self.notes.insert(0, note);
        info!(note_id = %id, "Note saved");
        Ok(id)
    }

    #[instrument(level = "debug", skip(self, content, links))]
    fn update_note(
        &mut self,
        id: &str,
        title: &str,
        content: &str,
        links: &[String],
    ) -> Result<(), DomainError> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))?;

        let mut note = self.notes[index].clone();
        note.title = title.to_string();
        note.content = content.to_string();
        note.links = links.to_vec();
        note.updated_at = Utc::now();
        self.write_note(&note)?;

        self.notes.remove(index);
        self.notes.insert(0, note);
        Ok(())
    }

    fn delete_note(&mut self, id: &str) -> Result<(), DomainError> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))?;

        let path = self.note_path(id);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| DomainError::Storage(format!("Failed to delete note file: {}", e)))?;
        }
        self.notes.remove(index);
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn storage_error(e: anyhow::Error) -> DomainError {
    DomainError::Storage(format!("{:#}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_saved_note_when_reopening_store_then_note_is_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let id = {
            let mut store = JsonNoteStore::open(temp_dir.path()).unwrap();
            store
                .save_note("Title", "Body", &["https://a.com".to_string()])
                .unwrap()
        };

        let mut reopened = JsonNoteStore::open(temp_dir.path()).unwrap();
        let note = reopened.get_note(&id).unwrap();

        assert!(id.starts_with("note_"));
        assert_eq!(note.content, "Body");
        assert_eq!(note.links, vec!["https://a.com"]);
    }

    #[test]
    fn given_two_saves_in_same_millisecond_when_saving_then_ids_differ() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonNoteStore::open(temp_dir.path()).unwrap();

        let first = store.save_note("a", "", &[]).unwrap();
        let second = store.save_note("b", "", &[]).unwrap();

        assert_ne!(first, second);
        assert_eq!(store.list_notes().unwrap().len(), 2);
    }

    #[test]
    fn given_missing_note_when_updating_then_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonNoteStore::open(temp_dir.path()).unwrap();

        let result = store.update_note("note_0", "t", "c", &[]);

        assert!(matches!(result, Err(DomainError::NoteNotFound(_))));
    }

    #[test]
    fn given_deleted_note_when_listing_then_file_and_entry_gone() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonNoteStore::open(temp_dir.path()).unwrap();
        let id = store.save_note("gone", "", &[]).unwrap();

        store.delete_note(&id).unwrap();

        assert!(store.list_notes().unwrap().is_empty());
        assert!(!temp_dir.path().join(format!("{}.json", id)).exists());
    }

    #[test]
    fn given_corrupt_file_when_opening_then_skips_it() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.json"), "{ not json").unwrap();

        let mut store = JsonNoteStore::open(temp_dir.path()).unwrap();

        assert!(store.list_notes().unwrap().is_empty());
    }

    #[test]
    fn given_sidebar_state_when_saving_then_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonNoteStore::open(temp_dir.path()).unwrap();
        assert_eq!(store.load_sidebar_state().unwrap(), None);
        let state = SidebarState {
            notes: vec![],
            last_sync_time: 42,
            is_collapsed: Some(true),
            selected_note_id: Some("note_1".to_string()),
            is_right_collapsed: None,
        };

        store.save_sidebar_state(&state).unwrap();

        assert_eq!(store.load_sidebar_state().unwrap(), Some(state));
    }

    #[test]
    fn given_note_with_capture_metadata_when_updating_then_metadata_survives() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("note_1.json"),
            r#"{"id":"note_1","title":"t","content":"","links":[],
               "created_at":"2024-05-01T12:00:00Z","updated_at":"2024-05-01T12:00:00Z",
               "tags":["work"],"source_app":"Safari"}"#,
        )
        .unwrap();
        let mut store = JsonNoteStore::open(temp_dir.path()).unwrap();

        store
            .update_note("note_1", "t", "c", &["https://a.com".to_string()])
            .unwrap();

        let mut reopened = JsonNoteStore::open(temp_dir.path()).unwrap();
        let note = reopened.get_note("note_1").unwrap();
        assert_eq!(note.tags, vec!["work"]);
        assert_eq!(note.source_app.as_deref(), Some("Safari"));
        assert_eq!(note.content, "c");
    }

    #[test]
    fn given_clipboard_state_when_saving_then_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonNoteStore::open(temp_dir.path()).unwrap();
        assert_eq!(store.load_clipboard_state().unwrap(), ClipboardState::default());
        let state = ClipboardState {
            last_internal_copy: Some("example.com/docs".to_string()),
        };

        store.save_clipboard_state(&state).unwrap();

        let reopened = JsonNoteStore::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.load_clipboard_state().unwrap(), state);
    }
}
