// src/domain/mod.rs
pub mod clipboard;
pub mod document;
pub mod error;
pub mod note;
pub mod url_list;

pub use clipboard::{
    ClassificationResult, ClipboardHistoryEntry, ClipboardSample, ClipboardState, Rule, RuleAction, RuleField,
};
pub use document::{Block, Document};
pub use error::DomainError;
pub use note::{Note, NoteMetadata, SidebarState};
pub use url_list::UrlList;
