//! HTML format implementation
//!
//! This module implements bidirectional conversion between folio Markdown and editor markup:
//! the HTML a rich-text editor loads, where every widget fence is an opaque placeholder.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `rcdom` + `markup5ever` ecosystem for HTML parsing and serialization:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//! - `markup5ever`: Serialization infrastructure
//!
//! Editors hand back whatever markup they like, so the parser must accept malformed input the
//! way a browser would.
//!
//! # Element Mapping Table
//!
//! | Markdown              | Editor markup                                             | Notes                          |
//! |-----------------------|-----------------------------------------------------------|--------------------------------|
//! | Widget fence          | `<div class="shadcn-block-placeholder" data-block-type data-json>` | Body escaped into `data-json` |
//! | Other fenced code     | `<pre><code class="language-x">`                          | Untouched                      |
//! | Paragraph, heading    | `<p>`, `<h1>`..`<h6>`                                     | Direct                         |
//! | Lists                 | `<ul>`/`<ol>` + `<li>`                                    | `start` kept for ordered lists |
//! | Table                 | `<table>`                                                 | First row is the header        |
//! | Emphasis, strong      | `<em>`/`<i>`, `<strong>`/`<b>`                            | Both spellings parsed          |
//! | Link, image           | `<a href>`, `<img src alt>`                               | Titles kept                    |
//!
//! # Placeholder Markup
//!
//! ```html
//! <div class="shadcn-block-placeholder" data-block-type="card" data-json="{&amp;quot;title&amp;quot;:&amp;quot;Hi&amp;quot;}"
//!      contenteditable="false" role="img" aria-label="Hi" tabindex="0">
//!   <span class="shadcn-block-label" aria-hidden="true">[CARD BLOCK]</span>
//!   <span class="sr-only">Embedded card block: Hi</span>
//! </div>
//! ```
//!
//! The `data-json` escape is reversible (see [`crate::blocks::escape`]), so a fence survives
//! markdown → markup → markdown byte for byte.

pub mod dom;
pub mod placeholder;
pub mod reverse;

use crate::compiler;
use crate::document::Document;
use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for editor markup
#[derive(Debug, Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Editor markup with opaque widget placeholders"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        compiler::try_html_to_md(source).map(Document::from_markdown)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        compiler::try_md_to_html(doc.markdown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_format_round_trip() {
        let doc = Document::from_markdown("```badge\n{\"label\":\"new\"}\n```\n");
        let html = HtmlFormat.serialize(&doc).unwrap();
        assert!(html.contains("data-block-type=\"badge\""));

        let back = HtmlFormat.parse(&html).unwrap();
        assert_eq!(back.markdown(), "```badge\n{\"label\":\"new\"}\n```\n");
    }

    #[test]
    fn test_html_format_metadata() {
        assert_eq!(HtmlFormat.name(), "html");
        assert_eq!(HtmlFormat.file_extensions(), &["html", "htm"]);
        assert!(HtmlFormat.supports_parsing());
    }
}
