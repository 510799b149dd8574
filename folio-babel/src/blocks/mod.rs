//! Widget blocks embedded in markdown
//!
//!     A block is a fenced code block whose language tag names a widget type and whose body is a
//!     JSON payload:
//!
//!     ```barchart
//!     {"title":"Q1 Revenue","data":[{"name":"Jan","value":10},{"name":"Feb","value":12}]}
//!     ```
//!
//!     The set of widget types is closed. [`BLOCK_TYPES`] is the only list of them: the schema
//!     registry, the markdown annotator, both markup transforms and the widget renderer all read
//!     it. A fence whose tag is not in the set is an ordinary code block and no stage touches it.
//!
//!     Payload parsing never fails a compile. [`parse_payload`] returns a `Result` so the caller
//!     decides the fallback: the annotator keeps the raw text, the placeholder transform uses the
//!     generic summary.

pub mod escape;
pub mod schema;

use crate::error::PayloadError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Class carried by every placeholder element in editor markup.
pub const PLACEHOLDER_CLASS: &str = "shadcn-block-placeholder";

/// Attribute holding the widget type on a placeholder.
pub const BLOCK_TYPE_ATTR: &str = "data-block-type";

/// Attribute holding the escaped JSON payload on a placeholder.
pub const JSON_ATTR: &str = "data-json";

/// Every recognized widget type, in registry order.
pub const BLOCK_TYPES: &[BlockType] = &[
    BlockType::Card,
    BlockType::Alert,
    BlockType::Badge,
    BlockType::BarChart,
    BlockType::LineChart,
    BlockType::AreaChart,
    BlockType::PieChart,
    BlockType::RadarChart,
    BlockType::ScatterChart,
    BlockType::TableJson,
];

/// A recognized widget type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Card,
    Alert,
    Badge,
    BarChart,
    LineChart,
    AreaChart,
    PieChart,
    RadarChart,
    ScatterChart,
    TableJson,
}

impl BlockType {
    /// The fence tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Card => "card",
            BlockType::Alert => "alert",
            BlockType::Badge => "badge",
            BlockType::BarChart => "barchart",
            BlockType::LineChart => "linechart",
            BlockType::AreaChart => "areachart",
            BlockType::PieChart => "piechart",
            BlockType::RadarChart => "radarchart",
            BlockType::ScatterChart => "scatterchart",
            BlockType::TableJson => "tablejson",
        }
    }

    /// Human readable name used in labels and summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            BlockType::Card => "Card",
            BlockType::Alert => "Alert",
            BlockType::Badge => "Badge",
            BlockType::BarChart => "Bar chart",
            BlockType::LineChart => "Line chart",
            BlockType::AreaChart => "Area chart",
            BlockType::PieChart => "Pie chart",
            BlockType::RadarChart => "Radar chart",
            BlockType::ScatterChart => "Scatter chart",
            BlockType::TableJson => "Table",
        }
    }

    /// Look up a type by its exact fence tag.
    pub fn from_tag(tag: &str) -> Option<BlockType> {
        BLOCK_TYPES.iter().copied().find(|t| t.as_str() == tag)
    }

    /// Resolve the widget type of a fenced block from its info string.
    ///
    /// Only the first whitespace-delimited word of the info string is the language tag.
    pub fn from_info_string(info: &str) -> Option<BlockType> {
        info.split_whitespace().next().and_then(Self::from_tag)
    }

    /// Resolve the widget type from an HTML `class` attribute (`language-<tag>`).
    pub fn from_class_list(class: &str) -> Option<BlockType> {
        class
            .split_whitespace()
            .filter_map(|c| c.strip_prefix("language-"))
            .find_map(Self::from_tag)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| format!("Unknown block type: {s}"))
    }
}

/// The body of a widget fence after one parse attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Payload {
    /// Body parsed as JSON
    Json(Value),
    /// Body that is not valid JSON, kept verbatim
    Raw(String),
}

impl Payload {
    /// Parse a fence body, degrading to `Raw` on malformed JSON.
    pub fn from_source(source: &str) -> Self {
        match parse_payload(source) {
            Ok(value) => Payload::Json(value),
            Err(err) => {
                tracing::warn!(error = %err, "block payload is not valid JSON, keeping raw text");
                Payload::Raw(source.to_string())
            }
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Raw(_) => None,
        }
    }
}

/// Parse a fence body as JSON.
pub fn parse_payload(source: &str) -> Result<Value, PayloadError> {
    Ok(serde_json::from_str(source)?)
}

/// Accessibility summary for a block.
///
/// Probes `title`, then `label`, then `name`. Falls back to `"<type> block"`.
pub fn accessible_summary(block_type: BlockType, payload: Option<&Value>) -> String {
    payload
        .and_then(|value| {
            ["title", "label", "name"]
                .iter()
                .find_map(|key| summary_field(value.get(*key)?))
        })
        .unwrap_or_else(|| format!("{} block", block_type.as_str()))
}

fn summary_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
