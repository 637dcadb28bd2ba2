// src/application/note_writer.rs
use crate::application::editing_session::EditingSession;
use crate::application::NoteRepository;
use crate::content::url::is_valid_url;
use crate::domain::url_list::validate_link_field;
use crate::domain::{DomainError, UrlList};
use tracing::{debug, info};

/// Creates and updates notes, keeping their links normalized.
pub struct NoteWriter<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteWriter<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    /// Create a note from a title, content and a comma-separated link field.
    pub fn create(&mut self, title: &str, content: &str, link_field: &str) -> Result<String, DomainError> {
        let links = validate_link_field(link_field)?.into_vec();
        let id = self.repository.save_note(title, content, &links)?;
        info!(note_id = %id, links = links.len(), "Note created");
        Ok(id)
    }

    /// Add one URL to a stored note.
    ///
    /// Returns `false` when the note already carries the URL.
    pub fn add_link(&mut self, note_id: &str, candidate: &str) -> Result<bool, DomainError> {
        if !is_valid_url(candidate) {
            return Err(DomainError::InvalidUrls(vec![candidate.trim().to_string()]));
        }

        let note = self.repository.get_note(note_id)?;
        let mut urls = UrlList::from_links(&note.links);
        if !urls.add(candidate) {
            debug!(note_id, "URL already present, nothing to update");
            return Ok(false);
        }

        self.repository
            .update_note(note_id, &note.title, &note.content, &urls.into_vec())?;
        Ok(true)
    }

    /// Persist an editing session: update its note, or create one for a new session.
    pub fn save_session(&mut self, session: &EditingSession) -> Result<String, DomainError> {
        let (title, content, links) = session.draft();
        match session.note_id() {
            Some(id) => {
                self.repository.update_note(id, &title, &content, &links)?;
                Ok(id.to_string())
            }
            None => self.repository.save_note(&title, &content, &links),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{sample_note, MockNoteRepository};
    use std::time::Duration;

    #[test]
    fn given_link_field_when_creating_then_stores_normalized_links() {
        let mut writer = NoteWriter::new(MockNoteRepository::builder().build());

        let id = writer.create("Reading", "body", "rust-lang.org, www.docs.rs").unwrap();

        let note = writer.repository_mut().get_note(&id).unwrap();
        assert_eq!(note.links, vec!["https://rust-lang.org", "https://www.docs.rs"]);
    }

    #[test]
    fn given_invalid_link_field_when_creating_then_nothing_saved() {
        let mut writer = NoteWriter::new(MockNoteRepository::builder().build());

        let result = writer.create("Reading", "body", "not a link");

        assert!(matches!(result, Err(DomainError::InvalidUrls(_))));
        assert!(writer.repository_mut().list_notes().unwrap().is_empty());
    }

    #[test]
    fn given_new_url_when_adding_link_then_note_updated() {
        let mut writer = NoteWriter::new(
            MockNoteRepository::builder()
                .with_note(sample_note("note_1", "Links"))
                .build(),
        );

        assert!(writer.add_link("note_1", "google.com").unwrap());
        assert!(!writer.add_link("note_1", "https://google.com").unwrap());

        let note = writer.repository_mut().get_note("note_1").unwrap();
        assert_eq!(note.links, vec!["https://google.com"]);
    }

    #[test]
    fn given_prose_when_adding_link_then_rejected() {
        let mut writer = NoteWriter::new(
            MockNoteRepository::builder()
                .with_note(sample_note("note_1", "Links"))
                .build(),
        );

        let result = writer.add_link("note_1", "hello world");

        assert!(matches!(result, Err(DomainError::InvalidUrls(_))));
    }

    #[test]
    fn given_new_session_when_saving_then_creates_note() {
        let mut writer = NoteWriter::new(MockNoteRepository::builder().build());
        let mut session = EditingSession::new(Duration::from_millis(100));
        session.set_title("Fresh");
        session.paste("some text");

        let id = writer.save_session(&session).unwrap();

        let note = writer.repository_mut().get_note(&id).unwrap();
        assert_eq!(note.title, "Fresh");
        assert_eq!(note.content, "some text");
    }
}
