// src/constants.rs
//
// Application-wide constants extracted from magic numbers throughout the codebase.
// Each constant is documented with its purpose and usage context.

/// Longest string (in characters) still considered a URL candidate.
///
/// Used in: `content/url.rs`
pub const MAX_URL_LENGTH: usize = 2048;

/// Shortest string (in characters) still considered a URL candidate.
///
/// Used in: `content/url.rs`
pub const MIN_URL_LENGTH: usize = 4;

/// Top-level domains accepted for bare domains like `example.xyz`.
///
/// A bare domain with any other TLD needs a path, query or fragment to count as a URL.
///
/// Used in: `content/url.rs`
pub const COMMON_TLDS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "io", "co", "uk", "de", "fr", "jp", "au", "ai", "dev",
    "app", "tech", "me", "ly", "tv", "cc", "xyz", "ca", "us", "ru", "cn", "br", "in",
];

/// Quiet period in milliseconds before a clipboard sample is classified.
///
/// Clipboard managers and some apps fire several change notifications for one copy.
///
/// Used in: `application/clipboard_debouncer.rs`, `infrastructure/config.rs`
pub const CLIPBOARD_DEBOUNCE_MS: u64 = 100;

/// Language tag given to code blocks whose fence carries none.
///
/// Used in: `domain/document.rs`
pub const DEFAULT_CODE_LANGUAGE: &str = "plaintext";

/// Title used in exports and listings when a note has none.
///
/// Used in: `ports/markdown.rs`, `lib.rs`
pub const UNTITLED_NOTE: &str = "Untitled Note";

/// Default number of unpinned clipboard history entries kept.
///
/// Used in: `application/clipboard_history.rs`, `infrastructure/config.rs`
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Default window in minutes within which identical clipboard text is merged.
///
/// Used in: `application/clipboard_history.rs`, `infrastructure/config.rs`
pub const DEFAULT_DEDUP_WINDOW_MINUTES: u64 = 10;

/// Longest accepted dedup window in minutes (one year). Larger values are clamped.
///
/// Used in: `application/clipboard_history.rs`, `infrastructure/config.rs`, `cli/args.rs`
pub const MAX_DEDUP_WINDOW_MINUTES: u64 = 525_600;

/// Timestamp format used for the metadata block of Markdown exports and note listings.
///
/// Used in: `ports/markdown.rs`, `lib.rs`
pub const EXPORT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
