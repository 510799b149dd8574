//! Block inspection format (export only)
//!
//! Serializes the annotation side table of a document as a JSON array, one entry per widget
//! fence, each with its validation result:
//!
//! ```json
//! [
//!   {
//!     "block_type": "card",
//!     "line": 3,
//!     "hint": "widget",
//!     "payload": { "kind": "json", "value": { "title": "Hello" } },
//!     "validation": { "valid": true }
//!   }
//! ]
//! ```

use crate::blocks::schema::{validate_payload, ValidationResult};
use crate::document::Document;
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::markdown::annotate::BlockAnnotation;
use serde::Serialize;

/// One inspected block.
#[derive(Debug, Clone, Serialize)]
pub struct BlockReport {
    #[serde(flatten)]
    pub annotation: BlockAnnotation,
    pub validation: ValidationResult,
}

impl BlockReport {
    pub fn from_annotation(annotation: BlockAnnotation) -> Self {
        let validation = validate_payload(annotation.block_type, &annotation.payload);
        Self {
            annotation,
            validation,
        }
    }
}

/// Annotate and validate every widget block in a document.
pub fn inspect(doc: &Document) -> Vec<BlockReport> {
    doc.blocks()
        .into_iter()
        .map(BlockReport::from_annotation)
        .collect()
}

/// Format implementation for block inspection
#[derive(Debug, Default)]
pub struct BlocksJsonFormat;

impl Format for BlocksJsonFormat {
    fn name(&self) -> &str {
        "blocks-json"
    }

    fn description(&self) -> &str {
        "JSON list of widget blocks with validation results"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&inspect(doc))
            .map_err(|e| FormatError::SerializationError(format!("JSON serialization failed: {e}")))
    }
}
