//! The document every format converts to and from.

use crate::formats::markdown::annotate::{annotate_blocks, BlockAnnotation};
use crate::formats::markdown::parse_markdown;
use comrak::Arena;

/// A folio document: markdown source with fenced widget blocks.
///
/// Markdown is the single source of truth. Derived views (annotations, markup, rendered pages)
/// are computed on demand and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    markdown: String,
}

impl Document {
    pub fn from_markdown(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
        }
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn into_markdown(self) -> String {
        self.markdown
    }

    pub fn is_empty(&self) -> bool {
        self.markdown.trim().is_empty()
    }

    /// Annotate every recognized widget fence, in document order.
    pub fn blocks(&self) -> Vec<BlockAnnotation> {
        let arena = Arena::new();
        let root = parse_markdown(&arena, &self.markdown);
        annotate_blocks(root)
    }
}

impl From<String> for Document {
    fn from(markdown: String) -> Self {
        Self::from_markdown(markdown)
    }
}
