// src/application/note_viewer.rs
use crate::domain::{DomainError, Note, NoteMetadata};

/// Backend collaborator that owns note storage.
pub trait NoteRepository {
    fn get_note(&mut self, id: &str) -> Result<Note, DomainError>;

    /// Metadata of every stored note, most recently updated first
    fn list_notes(&mut self) -> Result<Vec<NoteMetadata>, DomainError>;

    /// Create a note and return its generated id
    fn save_note(&mut self, title: &str, content: &str, links: &[String]) -> Result<String, DomainError>;

    fn update_note(
        &mut self,
        id: &str,
        title: &str,
        content: &str,
        links: &[String],
    ) -> Result<(), DomainError>;

    fn delete_note(&mut self, id: &str) -> Result<(), DomainError>;
}

impl<R: NoteRepository + ?Sized> NoteRepository for &mut R {
    fn get_note(&mut self, id: &str) -> Result<Note, DomainError> {
        (**self).get_note(id)
    }

    fn list_notes(&mut self) -> Result<Vec<NoteMetadata>, DomainError> {
        (**self).list_notes()
    }

    fn save_note(&mut self, title: &str, content: &str, links: &[String]) -> Result<String, DomainError> {
        (**self).save_note(title, content, links)
    }

    fn update_note(
        &mut self,
        id: &str,
        title: &str,
        content: &str,
        links: &[String],
    ) -> Result<(), DomainError> {
        (**self).update_note(id, title, content, links)
    }

    fn delete_note(&mut self, id: &str) -> Result<(), DomainError> {
        (**self).delete_note(id)
    }
}

pub struct NoteViewer<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteViewer<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn view_note(&mut self, note_id: &str) -> Result<Note, DomainError> {
        self.repository.get_note(note_id)
    }
}
