// src/content/mod.rs
pub mod classifier;
pub mod url;

pub use classifier::{classify, classify_for, Channel, CodeSignals};
pub use url::{is_valid_url, normalize_url};
