// src/ports/markdown.rs
use crate::constants::{EXPORT_DATETIME_FORMAT, UNTITLED_NOTE};
use crate::domain::Note;
use chrono::{DateTime, Local, Utc};
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clock {
    Local,
    Utc,
}

/// Renders notes in the Markdown export format.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownExporter {
    clock: Clock,
}

impl MarkdownExporter {
    /// Timestamps in the machine's local time zone
    pub fn local() -> Self {
        Self { clock: Clock::Local }
    }

    pub fn utc() -> Self {
        Self { clock: Clock::Utc }
    }

    fn format_time(&self, time: DateTime<Utc>) -> String {
        match self.clock {
            Clock::Local => time.with_timezone(&Local).format(EXPORT_DATETIME_FORMAT).to_string(),
            Clock::Utc => time.format(EXPORT_DATETIME_FORMAT).to_string(),
        }
    }

    #[instrument(level = "debug", skip(self, note), fields(note_id = %note.id))]
    pub fn render(&self, note: &Note) -> String {
        let mut lines: Vec<String> = Vec::new();

        let title = if note.title.trim().is_empty() {
            UNTITLED_NOTE
        } else {
            note.title.as_str()
        };
        lines.push(format!("# {}", title));
        lines.push(String::new());

        if !note.content.trim().is_empty() {
            lines.push(note.content.clone());
            lines.push(String::new());
        }

        if !note.links.is_empty() {
            lines.push("## Links".to_string());
            lines.push(String::new());
            lines.extend(note.links.iter().map(|link| format!("- {}", link)));
            lines.push(String::new());
        }

        lines.push("---".to_string());
        lines.push(format!("Created: {}", self.format_time(note.created_at)));
        lines.push(format!("Updated: {}", self.format_time(note.updated_at)));
        lines.push(format!("Note ID: {}", note.id));
        lines.push("---".to_string());

        lines.join("\n")
    }

    /// File name offered for an export, derived from the note title.
    pub fn file_name(&self, note: &Note) -> String {
        let stem: String = note
            .title
            .trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        let stem = stem.trim_matches('.');
        if stem.is_empty() {
            format!("{}.md", UNTITLED_NOTE)
        } else {
            format!("{}.md", stem)
        }
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::local()
    }
}
