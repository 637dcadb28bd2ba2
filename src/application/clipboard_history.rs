// src/application/clipboard_history.rs
use crate::constants::{DEFAULT_DEDUP_WINDOW_MINUTES, DEFAULT_HISTORY_LIMIT, MAX_DEDUP_WINDOW_MINUTES};
use crate::domain::{ClipboardHistoryEntry, ClipboardSample, DomainError, Rule, RuleAction, RuleField};
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::time::Instant;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistorySettings {
    /// Maximum number of unpinned entries; pinned entries are never evicted
    pub limit: usize,
    pub min_text_length: usize,
    pub dedup_window_minutes: u64,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
            min_text_length: 1,
            dedup_window_minutes: DEFAULT_DEDUP_WINDOW_MINUTES,
        }
    }
}

impl HistorySettings {
    /// Dedup window as a duration, clamped to [`MAX_DEDUP_WINDOW_MINUTES`].
    pub fn dedup_window(&self) -> Duration {
        let minutes = self.dedup_window_minutes.min(MAX_DEDUP_WINDOW_MINUTES);
        i64::try_from(minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .unwrap_or_else(Duration::zero)
    }
}

/// Text read from the system clipboard plus whatever is known about its origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Capture {
    pub text: String,
    pub source_app: Option<String>,
    pub window_title: Option<String>,
    pub source_url: Option<String>,
}

impl Capture {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    Blank,
    TooShort,
    Rule(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Added(String),
    /// Same text was captured within the dedup window; that entry moved to the top
    Deduplicated(String),
    Merged(String),
    Ignored(IgnoreReason),
}

struct CompiledRule {
    rule: Rule,
    regex: Regex,
}

/// Clipboard history, newest entry first.
pub struct ClipboardHistory {
    entries: Vec<ClipboardHistoryEntry>,
    settings: HistorySettings,
    rules: Vec<CompiledRule>,
    last_internal_copy: Option<String>,
}

impl ClipboardHistory {
    pub fn new(settings: HistorySettings) -> Self {
        Self::from_entries(Vec::new(), settings)
    }

    pub fn from_entries(mut entries: Vec<ClipboardHistoryEntry>, settings: HistorySettings) -> Self {
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let mut history = Self {
            entries,
            settings,
            rules: Vec::new(),
            last_internal_copy: None,
        };
        history.enforce_limit();
        history
    }

    pub fn entries(&self) -> &[ClipboardHistoryEntry] {
        &self.entries
    }

    pub fn settings(&self) -> HistorySettings {
        self.settings
    }

    pub fn limit(&self) -> usize {
        self.settings.limit
    }

    /// Change the limit, evicting the oldest unpinned entries beyond it.
    pub fn set_limit(&mut self, limit: usize) {
        self.settings.limit = limit;
        self.enforce_limit();
    }

    pub fn set_min_text_length(&mut self, min: usize) {
        self.settings.min_text_length = min;
    }

    pub fn set_dedup_window_minutes(&mut self, minutes: u64) {
        self.settings.dedup_window_minutes = minutes.min(MAX_DEDUP_WINDOW_MINUTES);
    }

    pub fn rules(&self) -> Vec<Rule> {
        self.rules.iter().map(|c| c.rule.clone()).collect()
    }

    /// Replace all rules. Nothing changes if any pattern fails to compile.
    pub fn set_rules(&mut self, rules: Vec<Rule>) -> Result<(), DomainError> {
        let compiled = rules
            .into_iter()
            .map(|rule| {
                let regex = Regex::new(&rule.pattern)
                    .map_err(|e| DomainError::InvalidRule(format!("{}: {}", rule.pattern, e)))?;
                if rule.action == RuleAction::Tag && rule.tag.as_deref().map_or(true, str::is_empty) {
                    return Err(DomainError::InvalidRule(format!(
                        "{}: tag action needs a tag",
                        rule.pattern
                    )));
                }
                Ok(CompiledRule { rule, regex })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        self.rules = compiled;
        Ok(())
    }

    pub fn set_rules_json(&mut self, json: &str) -> Result<(), DomainError> {
        let rules: Vec<Rule> =
            serde_json::from_str(json).map_err(|e| DomainError::InvalidRule(e.to_string()))?;
        self.set_rules(rules)
    }

    pub fn rules_json(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(&self.rules()).map_err(|e| DomainError::InvalidRule(e.to_string()))
    }

    #[instrument(level = "debug", skip(self, capture), fields(len = capture.text.len()))]
    pub fn record(&mut self, capture: Capture, now: DateTime<Utc>) -> RecordOutcome {
        let text = capture.text.trim();
        if text.is_empty() {
            return RecordOutcome::Ignored(IgnoreReason::Blank);
        }
        if text.chars().count() < self.settings.min_text_length {
            return RecordOutcome::Ignored(IgnoreReason::TooShort);
        }

        let mut tags = Vec::new();
        let mut merge = false;
        for compiled in &self.rules {
            let value = match compiled.rule.field {
                RuleField::Text => text,
                RuleField::Url => capture.source_url.as_deref().unwrap_or_default(),
                RuleField::App => capture.source_app.as_deref().unwrap_or_default(),
                RuleField::Type => "text",
            };
            if !compiled.regex.is_match(value) {
                continue;
            }
            match compiled.rule.action {
                RuleAction::Ignore => {
                    debug!(pattern = %compiled.rule.pattern, "Capture ignored by rule");
                    return RecordOutcome::Ignored(IgnoreReason::Rule(compiled.rule.pattern.clone()));
                }
                RuleAction::Tag => tags.extend(compiled.rule.tag.clone()),
                RuleAction::Merge => merge = true,
            }
        }

        let hash = content_hash(text);
        let window = self.settings.dedup_window();
        if let Some(index) = self.entries.iter().position(|e| {
            e.content_hash.as_deref() == Some(hash.as_str()) && now - e.timestamp <= window
        }) {
            let mut entry = self.entries.remove(index);
            entry.timestamp = now;
            merge_tags(&mut entry.tags, tags);
            let id = entry.id.clone();
            self.entries.insert(0, entry);
            return RecordOutcome::Deduplicated(id);
        }

        if merge {
            if let Some(entry) = self.entries.iter_mut().find(|e| !e.pinned) {
                entry.text = format!("{}\n{}", entry.text, text);
                entry.content_hash = Some(content_hash(&entry.text));
                entry.timestamp = now;
                merge_tags(&mut entry.tags, tags);
                let id = entry.id.clone();
                self.entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                return RecordOutcome::Merged(id);
            }
        }

        let id = format!("clip_{}_{}", now.timestamp_millis(), &hash[..8]);
        self.entries.insert(
            0,
            ClipboardHistoryEntry {
                id: id.clone(),
                text: text.to_string(),
                pinned: false,
                timestamp: now,
                source_app: capture.source_app,
                window_title: capture.window_title,
                source_url: capture.source_url,
                capture_type: "text".to_string(),
                tags,
                content_hash: Some(hash),
            },
        );
        self.enforce_limit();
        RecordOutcome::Added(id)
    }

    pub fn pin(&mut self, id: &str, pinned: bool) -> Result<(), DomainError> {
        let entry = self.find_mut(id)?;
        entry.pinned = pinned;
        if !pinned {
            self.enforce_limit();
        }
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), DomainError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| DomainError::EntryNotFound(id.to_string()))?;
        self.entries.remove(index);
        Ok(())
    }

    /// Remove entries; returns how many were removed.
    pub fn clear(&mut self, keep_pinned: bool) -> usize {
        let before = self.entries.len();
        if keep_pinned {
            self.entries.retain(|e| e.pinned);
        } else {
            self.entries.clear();
        }
        info!(removed = before - self.entries.len(), keep_pinned, "Cleared clipboard history");
        before - self.entries.len()
    }

    /// Hand an entry's text back for writing to the system clipboard.
    ///
    /// The text is remembered so the resulting clipboard notification is
    /// recognised as coming from the app itself.
    pub fn restore(&mut self, id: &str) -> Result<String, DomainError> {
        let text = self.find_mut(id)?.text.clone();
        self.last_internal_copy = Some(text.clone());
        Ok(text)
    }

    pub fn mark_internal_copy(&mut self, text: &str) {
        self.last_internal_copy = Some(text.to_string());
    }

    pub fn last_internal_copy(&self) -> Option<&str> {
        self.last_internal_copy.as_deref()
    }

    /// Wrap clipboard text in a sample, flagging the app's own writes.
    pub fn sample(&self, text: &str, observed_at: Instant) -> ClipboardSample {
        ClipboardSample {
            text: text.to_string(),
            originated_from_app: self.last_internal_copy.as_deref() == Some(text),
            observed_at,
        }
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut ClipboardHistoryEntry, DomainError> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| DomainError::EntryNotFound(id.to_string()))
    }

    fn enforce_limit(&mut self) {
        let mut unpinned = self.entries.iter().filter(|e| !e.pinned).count();
        while unpinned > self.settings.limit {
            // Entries are newest first, so the last unpinned one is the oldest.
            if let Some(index) = self.entries.iter().rposition(|e| !e.pinned) {
                let evicted = self.entries.remove(index);
                debug!(id = %evicted.id, "Evicted clipboard entry over limit");
            }
            unpinned -= 1;
        }
    }
}

fn merge_tags(existing: &mut Vec<String>, new: Vec<String>) {
    for tag in new {
        if !existing.contains(&tag) {
            existing.push(tag);
        }
    }
}

pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
