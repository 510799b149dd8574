//! Compiler entry points
//!
//! Two directions, each available as a fallible function and a total one:
//!
//! | Direction   | Fallible          | Total          | Fallback string                     |
//! |-------------|-------------------|----------------|-------------------------------------|
//! | md → html   | [`try_md_to_html`] | [`md_to_html`] | `Error converting Markdown to HTML` |
//! | html → md   | [`try_html_to_md`] | [`html_to_md`] | `Error converting HTML to Markdown` |
//!
//! The total functions catch every error and panic raised inside the pipeline at this single
//! boundary, log it, and return the fallback string. Nothing inside the pipeline swallows errors
//! on their behalf.

use crate::error::FormatError;
use crate::formats::html::dom::{find_body, parse_html, serialize_children};
use crate::formats::html::placeholder::insert_placeholders;
use crate::formats::html::reverse::restore_placeholders;
use crate::formats::markdown::annotate::annotate_blocks;
use crate::formats::markdown::serializer::serialize_dom_to_markdown;
use crate::formats::markdown::{parse_markdown, render_html};
use comrak::Arena;
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::panic;
use std::str::FromStr;

pub const MD_TO_HTML_FALLBACK: &str = "Error converting Markdown to HTML";
pub const HTML_TO_MD_FALLBACK: &str = "Error converting HTML to Markdown";

/// Which way a compile goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    MdToHtml,
    HtmlToMd,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::MdToHtml => "md-to-html",
            Direction::HtmlToMd => "html-to-md",
        }
    }

    /// The string the total entry point returns when this direction fails.
    pub fn fallback(&self) -> &'static str {
        match self {
            Direction::MdToHtml => MD_TO_HTML_FALLBACK,
            Direction::HtmlToMd => HTML_TO_MD_FALLBACK,
        }
    }

    pub fn try_compile(&self, input: &str) -> Result<String, FormatError> {
        match self {
            Direction::MdToHtml => try_md_to_html(input),
            Direction::HtmlToMd => try_html_to_md(input),
        }
    }

    /// Total compile: never fails, never panics.
    pub fn compile(&self, input: &str) -> String {
        convert_or_fallback(*self, input, |input| self.try_compile(input))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md-to-html" => Ok(Direction::MdToHtml),
            "html-to-md" => Ok(Direction::HtmlToMd),
            other => Err(format!("Unknown direction: {other}")),
        }
    }
}

/// Markdown → editor markup with widget placeholders.
pub fn try_md_to_html(markdown: &str) -> Result<String, FormatError> {
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
    let placeholders = insert_placeholders(&body);

    if placeholders != annotations.len() {
        tracing::warn!(
            annotated = annotations.len(),
            placeholders,
            "placeholder count differs from annotated blocks"
        );
    }
    tracing::debug!(bytes = markdown.len(), placeholders, "compiled markdown to markup");

    serialize_children(&body)
}

/// Editor markup → markdown, restoring every placeholder to its fence.
pub fn try_html_to_md(html: &str) -> Result<String, FormatError> {
    if html.trim().is_empty() {
        return Ok(String::new());
    }

    let dom = parse_html(html)?;
    let body = find_body(&dom)
        .ok_or_else(|| FormatError::ParseError("Markup has no body".to_string()))?;
    let restored = restore_placeholders(&body);
    tracing::debug!(bytes = html.len(), restored, "compiled markup to markdown");

    serialize_dom_to_markdown(&body)
}

/// Total markdown → markup. Returns [`MD_TO_HTML_FALLBACK`] on any internal failure.
pub fn md_to_html(markdown: &str) -> String {
    convert_or_fallback(Direction::MdToHtml, markdown, try_md_to_html)
}

/// Total markup → markdown. Returns [`HTML_TO_MD_FALLBACK`] on any internal failure.
pub fn html_to_md(html: &str) -> String {
    convert_or_fallback(Direction::HtmlToMd, html, try_html_to_md)
}

pub(crate) fn convert_or_fallback<F>(direction: Direction, input: &str, convert: F) -> String
where
    F: FnOnce(&str) -> Result<String, FormatError> + panic::UnwindSafe,
{
    match panic::catch_unwind(move || convert(input)) {
        Ok(Ok(output)) => output,
        Ok(Err(err)) => {
            tracing::error!(%direction, error = %err, "conversion failed");
            direction.fallback().to_string()
        }
        Err(payload) => {
            tracing::error!(%direction, panic = panic_message(payload.as_ref()), "conversion panicked");
            direction.fallback().to_string()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
