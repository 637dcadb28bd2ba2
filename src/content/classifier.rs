// src/content/classifier.rs
use crate::content::url::{is_valid_url, normalize_url};
use crate::domain::ClassificationResult;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const FENCE: &str = "```";

lazy_static! {
    static ref INDENTED_LINE_REGEX: Regex =
        Regex::new(r"^\s{2,}").expect("Failed to compile indented line regex");
    static ref CODE_CHARS_REGEX: Regex =
        Regex::new(r"(;|\{|\}|=>|#include|import\s|function\s|class\s)")
            .expect("Failed to compile code chars regex");
    static ref ENCLOSING_FENCE_REGEX: Regex =
        Regex::new(r"(?s)\A```(\w+)?\n(.*?)\n```\z").expect("Failed to compile fence regex");
}

/// Where a piece of text entered the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// External clipboard change captured in the background, or the link field
    ClipboardCapture,
    EditorPaste,
    EditorDrop,
}

impl Channel {
    fn detects_urls(self) -> bool {
        matches!(self, Channel::ClipboardCapture)
    }
}

fn has_fence(text: &str) -> bool {
    text.contains(FENCE)
}

fn is_multiline(text: &str) -> bool {
    text.split('\n').count() >= 3
}

fn has_indented_lines(text: &str) -> bool {
    text.split('\n')
        .filter(|line| INDENTED_LINE_REGEX.is_match(line) || line.starts_with('\t'))
        .count()
        >= 2
}

fn has_code_chars(text: &str) -> bool {
    CODE_CHARS_REGEX.is_match(text)
}

/// Code-likelihood heuristics, evaluated in this order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeSignals {
    pub has_fence: bool,
    pub is_multiline: bool,
    pub has_indented_lines: bool,
    pub has_code_chars: bool,
}

impl CodeSignals {
    pub fn detect(text: &str) -> Self {
        Self {
            has_fence: has_fence(text),
            is_multiline: is_multiline(text),
            has_indented_lines: has_indented_lines(text),
            has_code_chars: has_code_chars(text),
        }
    }

    pub fn looks_like_code(&self) -> bool {
        self.has_fence || (self.is_multiline && (self.has_indented_lines || self.has_code_chars))
    }
}

/// Classify clipboard-capture or link-field input.
///
/// # Examples
///
/// ```
/// use clipnotes::content::classifier::classify;
/// use clipnotes::domain::ClassificationResult;
///
/// assert_eq!(
///     classify("google.com"),
///     ClassificationResult::Url { url: "https://google.com".to_string() }
/// );
/// ```
pub fn classify(text: &str) -> ClassificationResult {
    classify_for(Channel::ClipboardCapture, text)
}

/// Classify `text` arriving through `channel`. Never fails.
///
/// Only the clipboard-capture channel turns URL-like text into a link; pasted
/// or dropped URLs stay text in the editor.
#[instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn classify_for(channel: Channel, text: &str) -> ClassificationResult {
    if channel.detects_urls() && is_valid_url(text) {
        return ClassificationResult::Url {
            url: normalize_url(text),
        };
    }

    let signals = CodeSignals::detect(text);
    debug!(?signals, "Code heuristics evaluated");

    if !signals.looks_like_code() {
        return ClassificationResult::PlainText {
            body: text.to_string(),
        };
    }

    let trimmed = text.trim();
    if let Some((language, body)) = match_enclosing_fence(trimmed) {
        return ClassificationResult::CodeBlock { language, body };
    }

    if signals.has_fence {
        // Several fences, or one that does not wrap the whole input.
        return ClassificationResult::PlainText {
            body: text.to_string(),
        };
    }

    ClassificationResult::CodeBlock {
        language: None,
        body: strip_fences(trimmed),
    }
}

/// Match a single fenced block spanning all of `trimmed`.
fn match_enclosing_fence(trimmed: &str) -> Option<(Option<String>, String)> {
    let caps = ENCLOSING_FENCE_REGEX.captures(trimmed)?;
    let body = caps.get(2).map_or("", |m| m.as_str());
    if body.contains(FENCE) {
        return None;
    }

    let language = caps.get(1).map(|m| m.as_str().to_string());
    let body = if body.is_empty() {
        strip_fences(trimmed)
    } else {
        body.to_string()
    };
    Some((language, body))
}

fn strip_fences(text: &str) -> String {
    text.replace(FENCE, "").trim().to_string()
}
