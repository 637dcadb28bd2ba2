// src/application/note_exporter.rs
use crate::application::NoteRepository;
use crate::domain::DomainError;
use crate::ports::MarkdownExporter;

/// A rendered note plus the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownExport {
    pub file_name: String,
    pub markdown: String,
}

/// Loads a note and renders it as a Markdown document.
pub struct NoteExporter<R: NoteRepository> {
    repository: R,
    exporter: MarkdownExporter,
}

impl<R: NoteRepository> NoteExporter<R> {
    pub fn new(repository: R, exporter: MarkdownExporter) -> Self {
        Self { repository, exporter }
    }

    pub fn export_note(&mut self, note_id: &str) -> Result<MarkdownExport, DomainError> {
        let note = self.repository.get_note(note_id)?;
        Ok(MarkdownExport {
            file_name: self.exporter.file_name(&note),
            markdown: self.exporter.render(&note),
        })
    }
}
