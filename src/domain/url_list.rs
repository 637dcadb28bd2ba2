// src/domain/url_list.rs
use crate::content::url::{is_valid_url, normalize_url};
use crate::domain::DomainError;
use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated links attached to one note.
///
/// Entries are always stored normalized; the first-seen URL stays first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlList(Vec<String>);

impl UrlList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse the comma-separated form stored in a note's link field.
    ///
    /// Blank input yields an empty list. Entries that collapse to the same
    /// normalized URL are kept once.
    ///
    /// # Examples
    ///
    /// ```
    /// use clipnotes::domain::UrlList;
    ///
    /// let urls = UrlList::parse("google.com, , https://rust-lang.org");
    /// assert_eq!(urls.join(), "https://google.com, https://rust-lang.org");
    /// ```
    pub fn parse(serialized: &str) -> Self {
        let mut list = Self::new();
        for candidate in serialized.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            list.add(candidate);
        }
        list
    }

    pub fn from_links<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for link in links {
            let link = link.as_ref().trim();
            if !link.is_empty() {
                list.add(link);
            }
        }
        list
    }

    pub fn join(&self) -> String {
        self.0.join(", ")
    }

    /// Append `candidate` in normalized form unless it is already present.
    ///
    /// Returns `true` when the list changed.
    pub fn add(&mut self, candidate: &str) -> bool {
        let normalized = normalize_url(candidate);
        if self.0.contains(&normalized) {
            return false;
        }
        self.0.push(normalized);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.0.iter().any(|u| u == url)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Validate a hand-edited link field.
///
/// Every entry has to pass URL validation; otherwise nothing is applied and the
/// offending entries are reported.
pub fn validate_link_field(value: &str) -> Result<UrlList, DomainError> {
    if value.trim().is_empty() {
        return Ok(UrlList::new());
    }

    let parsed = UrlList::parse(value);
    let invalid: Vec<String> = parsed
        .iter()
        .filter(|url| !is_valid_url(url))
        .map(str::to_string)
        .collect();

    if invalid.is_empty() {
        Ok(parsed)
    } else {
        Err(DomainError::InvalidUrls(invalid))
    }
}
