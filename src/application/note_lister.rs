// src/application/note_lister.rs
use crate::application::NoteRepository;
use crate::domain::{DomainError, NoteMetadata};

pub struct NoteLister<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteLister<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// List all notes, or filter by search query
    ///
    /// # Arguments
    /// * `search_query` - Optional case-insensitive term matched against titles
    ///
    /// # Returns
    /// Metadata of the matching notes, in repository order
    pub fn list_notes(&mut self, search_query: Option<&str>) -> Result<Vec<NoteMetadata>, DomainError> {
        let notes = self.repository.list_notes()?;
        Ok(match search_query {
            None => notes,
            Some(query) => {
                let query = query.to_lowercase();
                notes
                    .into_iter()
                    .filter(|n| n.title.to_lowercase().contains(&query))
                    .collect()
            }
        })
    }
}
