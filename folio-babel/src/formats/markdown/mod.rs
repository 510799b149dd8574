//! Markdown format implementation
//!
//! Markdown is the source of truth for a folio document: the fenced block text is the only place
//! a widget payload lives. This module owns everything that touches the markdown side of the
//! pipeline.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing and serialization. This choice is based on:
//! - Single crate for both parsing and serialization
//! - Feature-rich with CommonMark compliance
//! - Robust and well-maintained
//! - Supports extensions (tables, strikethrough, etc.)
//!
//! # Pipeline Stages
//!
//! | Stage              | Direction       | Module          |
//! |--------------------|-----------------|-----------------|
//! | Parse              | text → AST      | [`parse_markdown`] |
//! | Annotate blocks    | AST → side table| [`annotate`]    |
//! | Render markup      | AST → HTML      | [`render_html`] |
//! | Serialize from DOM | DOM → text      | [`serializer`]  |
//!
//! # Lossy Conversions
//!
//! Going from markup back to markdown normalizes what CommonMark cannot tell apart:
//! - Bullet markers are always `-`, emphasis is always `*`
//! - Setext headings become ATX headings
//! - Whitespace runs inside paragraphs collapse to one space
//! - Elements with no markdown equivalent keep their text only
//!
//! Fenced widget blocks are not lossy: their body survives byte for byte.

pub mod annotate;
pub mod serializer;

use crate::document::Document;
use crate::error::FormatError;
use crate::format::Format;
use comrak::nodes::AstNode;
use comrak::{format_html, parse_document, Arena, ComrakOptions};

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown with fenced widget blocks"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(Document::from_markdown(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(doc.markdown().to_string())
    }
}

pub(crate) fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.superscript = true;
    options.extension.front_matter_delimiter = Some("---".to_string());
    options
}

/// Parse markdown into a comrak AST allocated in `arena`.
pub fn parse_markdown<'a>(arena: &'a Arena<AstNode<'a>>, source: &str) -> &'a AstNode<'a> {
    parse_document(arena, source, &default_comrak_options())
}

/// Render a comrak AST to HTML.
///
/// Raw HTML in the source is not passed through; widget fences come out as
/// `<pre><code class="language-<type>">`.
pub fn render_html<'a>(root: &'a AstNode<'a>) -> Result<String, FormatError> {
    let mut output = Vec::new();
    format_html(root, &default_comrak_options(), &mut output)
        .map_err(|e| FormatError::SerializationError(format!("Comrak HTML rendering failed: {e}")))?;
    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}
