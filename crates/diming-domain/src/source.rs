//! Source module - text handed over by upstream document readers
//!
//! Document readers (EPUB, PDF/OCR) live outside this workspace. They deliver
//! either content sections or pages, and the pipeline only ever sees the
//! flattened text.

use serde::{Deserialize, Serialize};

/// Something that can be flattened into the single text the pipeline consumes
pub trait TextSource {
    /// Flatten into plain text
    fn to_text(&self) -> String;
}

/// One content section of an EPUB book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading (first `h1`), may be empty
    pub title: String,

    /// Non-empty paragraphs in reading order
    pub content: Vec<String>,
}

impl TextSource for Section {
    /// Paragraphs joined by newlines. The title is not part of the text.
    fn to_text(&self) -> String {
        self.content.join("\n")
    }
}

/// One page of extracted or OCR'd PDF text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number
    pub page_num: u32,

    /// Page text
    pub text: String,
}

impl TextSource for Page {
    fn to_text(&self) -> String {
        self.text.clone()
    }
}

/// Join several sources into one text, separated by blank lines
pub fn flatten_sources<S: TextSource>(sources: &[S]) -> String {
    sources
        .iter()
        .map(TextSource::to_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}
