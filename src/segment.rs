use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::document::{Document, Element};
use crate::error::{Result, TopicError};

/// Traversal state of the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    Inactive,
    Active,
    Terminated,
}

impl SegmentState {
    /// Next state after visiting an element tagged with `lang`.
    /// Elements without a `lang` attribute never change the state.
    pub fn advance(self, lang: Option<&str>, target: &str) -> SegmentState {
        match (self, lang) {
            (SegmentState::Terminated, _) => SegmentState::Terminated,
            (_, Some(code)) if code == target => SegmentState::Active,
            (SegmentState::Active, Some(_)) => SegmentState::Terminated,
            (state, _) => state,
        }
    }
}

pub struct SegmentExtractor {
    language: String,
}

impl SegmentExtractor {
    pub fn new(language: &str) -> Self {
        SegmentExtractor {
            language: language.to_string(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Extract the text of the first segment in the target language, joined
    /// with single spaces.
    pub fn extract(&self, document: &Document) -> Result<String> {
        let mut state = SegmentState::Inactive;
        let mut pieces: Vec<&str> = Vec::new();

        for element in document.elements() {
            state = state.advance(element.lang.as_deref(), &self.language);
            match state {
                SegmentState::Terminated => {
                    debug!(tag = %element.tag, lang = ?element.lang, "Language segment ended");
                    break;
                }
                SegmentState::Active => collect_element(element, &mut pieces),
                SegmentState::Inactive => {}
            }
        }

        if pieces.is_empty() {
            return Err(TopicError::NoMatchingLanguage {
                language: self.language.clone(),
            });
        }

        let text = pieces.join(" ");
        info!(language = %self.language, pieces = pieces.len(), chars = text.len(), "Extracted language segment");
        Ok(text)
    }
}

/// Tail before inline text: that is the order in which a streaming traversal
/// has them available.
fn collect_element<'a>(element: &'a Element, pieces: &mut Vec<&'a str>) {
    for chunk in [element.tail.as_deref(), element.text.as_deref()].into_iter().flatten() {
        let trimmed = chunk.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed);
        }
    }
}

/// Read a patent application from disk and return its text in `language`.
pub fn read_application(path: &Path, language: &str) -> Result<String> {
    let xml = fs::read_to_string(path).map_err(|source| TopicError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = Document::parse(&xml)?;
    SegmentExtractor::new(language).extract(&document)
}
