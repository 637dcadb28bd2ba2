// src/application/note_deleter.rs
use crate::application::NoteRepository;
use crate::domain::DomainError;
use tracing::info;

pub struct NoteDeleter<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteDeleter<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn delete_note(&mut self, note_id: &str) -> Result<(), DomainError> {
        self.repository.delete_note(note_id)?;
        info!(note_id, "Note deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::util::testing::{sample_note, MockNoteRepository};

    #[test]
    fn given_existing_note_when_deleting_then_succeeds() {
        // Arrange
        let mock = MockNoteRepository::builder()
            .with_note(sample_note("note_123", "Doomed"))
            .build();
        let mut deleter = NoteDeleter::new(mock);

        // Act
        let result = deleter.delete_note("note_123");

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    fn given_nonexistent_note_when_deleting_then_returns_error() {
        // Arrange
        let mock = MockNoteRepository::builder().build();
        let mut deleter = NoteDeleter::new(mock);

        // Act
        let result = deleter.delete_note("note_999");

        // Assert
        match result.expect_err("Should return error") {
            DomainError::NoteNotFound(id) => assert_eq!(id, "note_999"),
            _ => panic!("Expected NoteNotFound error"),
        }
    }
}
