//! Format implementations
//!
//! This module contains all format implementations that convert between
//! folio Markdown and other representations.

pub mod blocks_json;
pub mod html;
pub mod markdown;
pub mod page;

pub use blocks_json::BlocksJsonFormat;
pub use html::HtmlFormat;
pub use markdown::MarkdownFormat;
pub use page::PageFormat;

/// The stylesheet embedded in every rendered page.
pub fn get_default_css() -> &'static str {
    crate::render::BASELINE_CSS
}
