//! Widget Renderer Registry and Final Rendering
//!
//! The editor never sees a widget: it gets an opaque placeholder. The published page gets the
//! real thing. This module turns each annotated widget block into its component markup.
//!
//! # Architecture
//!
//! 1.  **`WidgetRenderer` Trait**: renders one block type from its parsed payload into an rcdom
//!     subtree. Renderers never fail; payload fields are coerced leniently (see [`util`]).
//! 2.  **`WidgetRegistry`**: a static mapping from [`BlockType`] to renderer.
//!     [`WidgetRegistry::with_standard`] registers one component per block type.
//!
//! # Document Rendering
//!
//! [`render_document`] runs comrak → annotate → HTML, then replaces each recognized
//! `pre > code` with its component. Annotations and rendered code blocks are paired in document
//! order. A block whose payload is not JSON keeps its plain code block so the author can see
//! what is wrong with it.
//!
//! # Usage
//!
//! ```rust,ignore
//! let options = RenderOptions::default();
//! let html = render_page("# Post\n\n```badge\n{\"label\":\"new\"}\n```\n", &options)?;
//! ```

pub mod charts;
pub mod components;
pub mod util;

use crate::blocks::{BlockType, Payload, BLOCK_TYPES};
use crate::error::FormatError;
use crate::formats::html::dom::{
    append, create_element, find_body, is_element, parse_html, rewrite_matching,
    serialize_children,
};
use crate::formats::html::placeholder::widget_code_block;
use crate::formats::markdown::annotate::{annotate_blocks, BlockAnnotation, RenderHint};
use crate::formats::markdown::{parse_markdown, render_html};
use comrak::Arena;
use markup5ever_rcdom::Handle;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

pub const DEFAULT_CHART_HEIGHT: u32 = 300;
pub const DEFAULT_TABLE_PAGE_SIZE: usize = 10;

/// Embedded baseline stylesheet for rendered pages.
pub const BASELINE_CSS: &str = include_str!("../../css/baseline.css");

/// Presentation settings for final rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Page `<title>`
    pub title: String,
    /// Chart height when the payload has none
    pub chart_height: u32,
    /// Table rows per page when the payload has no `pageSize`
    pub table_page_size: usize,
    /// Appended after the baseline stylesheet
    pub custom_css: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            chart_height: DEFAULT_CHART_HEIGHT,
            table_page_size: DEFAULT_TABLE_PAGE_SIZE,
            custom_css: None,
        }
    }
}

/// Renders one widget type.
pub trait WidgetRenderer: Send + Sync {
    /// The block type this renderer handles.
    fn block_type(&self) -> BlockType;

    /// Render the component for a parsed payload.
    fn render(&self, data: &Value, options: &RenderOptions) -> Handle;
}

/// A registry of widget renderers.
pub struct WidgetRegistry {
    renderers: HashMap<BlockType, Box<dyn WidgetRenderer>>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Creates a registry with a component for every block type.
    pub fn with_standard() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(components::CardRenderer));
        registry.register(Box::new(components::AlertRenderer));
        registry.register(Box::new(components::BadgeRenderer));
        registry.register(Box::new(components::TableRenderer));
        registry.register(Box::new(charts::BarChartRenderer));
        registry.register(Box::new(charts::LineChartRenderer));
        registry.register(Box::new(charts::AreaChartRenderer));
        registry.register(Box::new(charts::PieChartRenderer));
        registry.register(Box::new(charts::RadarChartRenderer));
        registry.register(Box::new(charts::ScatterChartRenderer));
        registry
    }

    /// Registers a renderer, replacing any previous one for its type.
    pub fn register(&mut self, renderer: Box<dyn WidgetRenderer>) {
        self.renderers.insert(renderer.block_type(), renderer);
    }

    pub fn get(&self, block_type: BlockType) -> Option<&dyn WidgetRenderer> {
        self.renderers.get(&block_type).map(|r| r.as_ref())
    }

    /// Block types with no renderer registered.
    pub fn missing(&self) -> Vec<BlockType> {
        BLOCK_TYPES
            .iter()
            .copied()
            .filter(|block_type| !self.renderers.contains_key(block_type))
            .collect()
    }

    /// Render a block wrapped in its `folio-widget` container.
    pub fn render(
        &self,
        block_type: BlockType,
        data: &Value,
        options: &RenderOptions,
    ) -> Option<Handle> {
        let renderer = self.get(block_type)?;
        let class = format!("folio-widget folio-widget-{}", block_type.as_str());
        let wrapper = create_element(
            "div",
            vec![
                ("class", class.as_str()),
                ("data-block-type", block_type.as_str()),
            ],
        );
        append(&wrapper, renderer.render(data, options));
        Some(wrapper)
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static STANDARD: Lazy<WidgetRegistry> = Lazy::new(WidgetRegistry::with_standard);

/// Render one widget by tag. Unknown tags yield `None`.
pub fn render_widget(tag: &str, payload: &Value, options: &RenderOptions) -> Option<Handle> {
    let block_type = BlockType::from_tag(tag)?;
    STANDARD.render(block_type, payload, options)
}

/// Render markdown to final HTML with every valid widget block replaced by its component.
///
/// Returns the body fragment only; see [`render_page`] for a full document.
pub fn render_document(markdown: &str, options: &RenderOptions) -> Result<String, FormatError> {
    if markdown.is_empty() {
        return Ok(String::new());
    }

    let arena = Arena::new();
    let root = parse_markdown(&arena, markdown);
    let annotations = annotate_blocks(root);
    let rendered = render_html(root)?;

    let dom = parse_html(&rendered)?;
    let body = find_body(&dom)
        .ok_or_else(|| FormatError::SerializationError("Rendered markup has no body".to_string()))?;

    let mut pending = annotations.into_iter();
    let replaced = rewrite_matching(&body, &|node: &Handle| is_element(node, "pre"), &mut |pre| {
        let (block_type, raw) = widget_code_block(pre)?;
        let annotation = next_annotation(&mut pending, block_type, &raw);
        match &annotation.payload {
            Payload::Json(data) => STANDARD.render(block_type, data, options),
            Payload::Raw(_) => None,
        }
    });
    tracing::debug!(replaced, "rendered widget blocks");

    serialize_children(&body)
}

/// Take the next annotation, re-deriving it if the pairing has drifted.
fn next_annotation(
    pending: &mut impl Iterator<Item = BlockAnnotation>,
    block_type: BlockType,
    raw: &str,
) -> BlockAnnotation {
    match pending.next() {
        Some(annotation) if annotation.block_type == block_type => annotation,
        other => {
            tracing::warn!(
                expected = %block_type,
                found = ?other.map(|a| a.block_type),
                "annotation order mismatch, parsing block in place"
            );
            let payload = Payload::from_source(raw);
            let hint = match payload {
                Payload::Json(_) => RenderHint::Widget,
                Payload::Raw(_) => RenderHint::CodeBlock,
            };
            BlockAnnotation {
                block_type,
                payload,
                hint,
                line: 0,
            }
        }
    }
}

/// Render markdown to a complete, self-contained HTML page.
pub fn render_page(markdown: &str, options: &RenderOptions) -> Result<String, FormatError> {
    let body = render_document(markdown, options)?;
    Ok(wrap_in_document(&body, options))
}

/// Wrap a body fragment in a complete HTML document with embedded CSS
pub fn wrap_in_document(body_html: &str, options: &RenderOptions) -> String {
    let custom_css = options.custom_css.as_deref().unwrap_or("");
    let escaped_title = html_escape(&options.title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="folio-babel">
  <title>{escaped_title}</title>
  <style>
{BASELINE_CSS}
{custom_css}
  </style>
</head>
<body>
<article class="folio-document">
{body_html}
</article>
</body>
</html>"#
    )
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn standard_registry_covers_every_block_type() {
        assert!(WidgetRegistry::with_standard().missing().is_empty());
        assert_eq!(WidgetRegistry::new().missing().len(), BLOCK_TYPES.len());
    }

    #[test]
    fn unknown_tag_renders_nothing() {
        assert!(render_widget("foobar", &json!({}), &RenderOptions::default()).is_none());
        assert!(render_widget("badge", &json!({"label": "x"}), &RenderOptions::default()).is_some());
    }

    #[test]
    fn document_replaces_valid_blocks_only() {
        let markdown = "```badge\n{\"label\":\"new\"}\n```\n\n```alert\n{oops\n```\n\n```python\nprint(1)\n```\n";
        let html = render_document(markdown, &RenderOptions::default()).unwrap();
        assert!(html.contains("<div class=\"folio-widget folio-widget-badge\" data-block-type=\"badge\">"));
        assert!(html.contains("<code class=\"language-alert\">{oops\n</code>"));
        assert!(html.contains("<code class=\"language-python\">"));
    }

    #[test]
    fn page_embeds_css_and_escapes_title() {
        let options = RenderOptions {
            title: "Tom & Jerry".to_string(),
            custom_css: Some(".mine { color: red; }".to_string()),
            ..RenderOptions::default()
        };
        let page = render_page("Hello\n", &options).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Tom &amp; Jerry</title>"));
        assert!(page.contains(".folio-widget"));
        assert!(page.contains(".mine { color: red; }"));
        assert!(page.contains("<p>Hello</p>"));
    }
}
