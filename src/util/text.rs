// src/util/text.rs
use html_escape::decode_html_entities;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLOCK_TAG_REGEX: Regex =
        Regex::new(r"</?(p|div|br|li|pre|h[1-6])[^>]*>").expect("Failed to compile block tag regex");
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]+>").expect("Failed to compile tag regex");
}

/// First non-empty line of note content, which may be editor HTML or plain text.
///
/// Block-level tags count as line breaks, other tags are dropped and entities
/// decoded. The result is cut to `max_chars` characters with a trailing `…`.
///
/// # Examples
///
/// ```
/// use clipnotes::util::text::preview_line;
///
/// assert_eq!(preview_line("<p>Trees &amp; Graphs</p><p>More</p>", 40), "Trees & Graphs");
/// assert_eq!(preview_line("\n  plain text\nnext", 5), "plain…");
/// ```
pub fn preview_line(content: &str, max_chars: usize) -> String {
    let decoded = decode_html_entities(content).to_string();
    let with_newlines = BLOCK_TAG_REGEX.replace_all(&decoded, "\n");
    let no_tags = TAG_REGEX.replace_all(&with_newlines, "");

    let line = no_tags
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    if line.chars().count() <= max_chars {
        line.to_string()
    } else {
        let cut: String = line.chars().take(max_chars).collect();
        format!("{}…", cut.trim_end())
    }
}
