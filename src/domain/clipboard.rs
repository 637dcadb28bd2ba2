// src/domain/clipboard.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// What a piece of clipboard, paste or drop text turned out to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassificationResult {
    Url { url: String },
    CodeBlock { language: Option<String>, body: String },
    PlainText { body: String },
}

/// One external clipboard-change notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardSample {
    pub text: String,
    pub originated_from_app: bool,
    pub observed_at: Instant,
}

impl ClipboardSample {
    pub fn external(text: impl Into<String>, observed_at: Instant) -> Self {
        Self {
            text: text.into(),
            originated_from_app: false,
            observed_at,
        }
    }

    pub fn from_app(text: impl Into<String>, observed_at: Instant) -> Self {
        Self {
            text: text.into(),
            originated_from_app: true,
            observed_at,
        }
    }
}

/// Clipboard bookkeeping kept next to the history between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClipboardState {
    /// Text the app itself last wrote to the system clipboard
    #[serde(default)]
    pub last_internal_copy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClipboardHistoryEntry {
    pub id: String,
    pub text: String,
    pub pinned: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub source_app: Option<String>,
    #[serde(default)]
    pub window_title: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default = "default_capture_type")]
    pub capture_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub content_hash: Option<String>,
}

fn default_capture_type() -> String {
    "text".to_string()
}

/// Which attribute of a captured entry a rule pattern is matched against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleField {
    Text,
    Url,
    App,
    Type,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    /// Attach `tag` to the captured entry
    Tag,
    /// Drop the capture entirely
    Ignore,
    /// Fold the capture into the newest unpinned entry
    Merge,
}

/// Capture rule applied by the clipboard history before an entry is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    pub pattern: String,
    pub field: RuleField,
    pub action: RuleAction,
    #[serde(default)]
    pub tag: Option<String>,
}
