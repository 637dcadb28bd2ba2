// src/domain/document.rs
use crate::constants::DEFAULT_CODE_LANGUAGE;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    Paragraph(String),
    CodeBlock { language: String, body: String },
}

/// Block-level model of the editor content a classification is inserted into.
///
/// The cursor is always at the end of the document. Content loaded with
/// [`Document::from_text`] renders back byte for byte until a block is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    blocks: Vec<Block>,
    #[serde(skip)]
    line_ending: &'static str,
    #[serde(skip)]
    trailing_newline: bool,
    #[serde(skip)]
    source: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            line_ending: "\n",
            trailing_newline: false,
            source: None,
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from stored note content, one paragraph per line.
    ///
    /// Blank lines become empty paragraphs. CRLF content keeps CRLF endings.
    pub fn from_text(content: &str) -> Self {
        let blocks = content
            .lines()
            .map(|line| Block::Paragraph(line.to_string()))
            .collect();
        Self {
            blocks,
            line_ending: if content.contains("\r\n") { "\r\n" } else { "\n" },
            trailing_newline: content.ends_with('\n'),
            source: Some(content.to_string()),
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.text_content().trim().is_empty()
    }

    /// Whether a block was inserted since the document was loaded.
    pub fn is_modified(&self) -> bool {
        self.source.is_none() && !self.blocks.is_empty()
    }

    /// Concatenated text of all blocks without separators.
    pub fn text_content(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Paragraph(text) => text.as_str(),
                Block::CodeBlock { body, .. } => body.as_str(),
            })
            .collect()
    }

    pub fn insert_code_block(&mut self, language: Option<&str>, body: &str) {
        self.source = None;
        self.blocks.push(Block::CodeBlock {
            language: language.unwrap_or(DEFAULT_CODE_LANGUAGE).to_string(),
            body: body.to_string(),
        });
    }

    /// Insert prose. Into an empty document the text goes in directly;
    /// otherwise it always starts a new block after a line break.
    pub fn insert_text(&mut self, body: &str) {
        self.source = None;
        if self.is_empty() {
            self.blocks.clear();
            self.trailing_newline = false;
        }
        self.blocks.push(Block::Paragraph(body.to_string()));
    }

    /// Render back into the plain-text form stored in a note.
    pub fn to_text(&self) -> String {
        if let Some(source) = &self.source {
            return source.clone();
        }

        let eol = self.line_ending;
        let mut text = self
            .blocks
            .iter()
            .map(|block| match block {
                Block::Paragraph(text) => text.clone(),
                Block::CodeBlock { language, body } => {
                    let body = body.lines().collect::<Vec<_>>().join(eol);
                    format!("```{}{}{}{}```", language, eol, body, eol)
                }
            })
            .collect::<Vec<_>>()
            .join(eol);
        if self.trailing_newline {
            text.push_str(eol);
        }
        text
    }
}
