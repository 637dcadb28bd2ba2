// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("Invalid URL detected: {}", .0.join(", "))]
    InvalidUrls(Vec<String>),
    #[error("Invalid rule: {0}")]
    InvalidRule(String),
    #[error("Clipboard entry not found: {0}")]
    EntryNotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
