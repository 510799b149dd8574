//! The `Format` trait
//!
//! A format is one external view of a [`Document`]: editor markup, the rendered page, a block
//! report. Import-only and export-only formats leave the other direction at its default.

use crate::document::Document;
use crate::error::FormatError;
use std::collections::HashMap;

/// Trait for document formats
///
/// Implementors provide conversion between a string representation and a [`Document`], whose
/// markdown source is the single source of truth. Formats can support parsing, serialization,
/// or both.
///
/// # Examples
///
/// ```ignore
/// struct Plain;
///
/// impl Format for Plain {
///     fn name(&self) -> &str {
///         "plain"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         Ok(doc.markdown().to_string())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// Registry key and `--to`/`--from` value
    fn name(&self) -> &str;

    /// One-line summary for `--list-formats`
    fn description(&self) -> &str {
        ""
    }

    /// Lowercase extensions without the dot, used to detect the input format
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether [`Format::parse`] is implemented
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether [`Format::serialize`] is implemented
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Convert source text into a markdown [`Document`]
    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Produce this format's text from the document's markdown
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a Document, optionally using extra parameters.
    ///
    /// Formats without options can rely on the default implementation, which delegates to
    /// [`Format::serialize`] and rejects any parameter.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(doc)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}
