// src/ports/mod.rs
pub mod markdown;

pub use markdown::MarkdownExporter;
