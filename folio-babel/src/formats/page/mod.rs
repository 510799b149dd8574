//! Rendered page format (export only)
//!
//! Produces the published view of a document: a complete HTML5 page where every valid widget
//! block is rendered as its component and the baseline stylesheet is embedded.
//!
//! # Options
//!
//! | Key               | Value                       | Default    |
//! |-------------------|-----------------------------|------------|
//! | `title`           | Page `<title>`              | `Untitled` |
//! | `chart-height`    | Chart height, 100..=1000    | `300`      |
//! | `table-page-size` | Rows per table page, 1..=100| `10`       |
//! | `css`             | CSS appended to the styles  | none       |
//! | `css-path`        | File appended to the styles | none       |

use crate::document::Document;
use crate::error::FormatError;
use crate::format::Format;
use crate::render::{render_page, RenderOptions};
use std::collections::HashMap;

/// Format implementation for the final rendered page
#[derive(Debug, Default)]
pub struct PageFormat;

impl PageFormat {
    /// Build render options from `--extra-*` style parameters.
    pub fn options_from(options: &HashMap<String, String>) -> Result<RenderOptions, FormatError> {
        let mut render = RenderOptions::default();

        for (key, value) in options {
            match key.as_str() {
                "title" => render.title = value.clone(),
                "chart-height" => render.chart_height = parse_in_range(key, value, 100, 1000)?,
                "table-page-size" => {
                    render.table_page_size = parse_in_range(key, value, 1, 100)? as usize
                }
                "css" => append_css(&mut render, value),
                "css-path" => {
                    let css = std::fs::read_to_string(value).map_err(|e| {
                        FormatError::SerializationError(format!(
                            "Failed to read CSS file '{value}': {e}"
                        ))
                    })?;
                    append_css(&mut render, &css);
                }
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'page' does not support parameter '{other}'"
                    )))
                }
            }
        }

        Ok(render)
    }
}

fn append_css(render: &mut RenderOptions, css: &str) {
    match &mut render.custom_css {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(css);
        }
        None => render.custom_css = Some(css.to_string()),
    }
}

fn parse_in_range(key: &str, value: &str, min: u32, max: u32) -> Result<u32, FormatError> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| (min..=max).contains(n))
        .ok_or_else(|| {
            FormatError::SerializationError(format!(
                "Invalid value '{value}' for '{key}': expected an integer from {min} to {max}"
            ))
        })
}

impl Format for PageFormat {
    fn name(&self) -> &str {
        "page"
    }

    fn description(&self) -> &str {
        "Self-contained HTML page with rendered widgets"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        render_page(doc.markdown(), &RenderOptions::default())
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let render = Self::options_from(options)?;
        render_page(doc.markdown(), &render)
    }
}
