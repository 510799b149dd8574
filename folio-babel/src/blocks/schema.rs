//! Block schema registry
//!
//! One statically declared schema per widget type. A schema is a list of [`Field`]s, each with a
//! [`FieldKind`] describing what the value must look like: string formats, enumerations, numeric
//! ranges, array bounds and nested objects.
//!
//! Validation collects every problem rather than stopping at the first. Messages read
//! `"<path>: <reason>"` with a JSON-pointer style path, e.g. `/data/2/value: expected a number`.
//! Fields not named in a schema are ignored.

use super::{BlockType, Payload};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color pattern is valid"));

/// Whether `text` is a `#rrggbb` color.
pub fn is_hex_color(text: &str) -> bool {
    HEX_COLOR.is_match(text)
}

/// Constraint on a string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Any,
    /// `#rrggbb`
    HexColor,
    /// Absolute URL
    Url,
}

/// Shape a field value must have.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text(StringFormat),
    Number {
        min: Option<f64>,
        max: Option<f64>,
        integer: bool,
    },
    Boolean,
    OneOf(&'static [&'static str]),
    List {
        items: &'static FieldKind,
        min_items: usize,
        max_items: Option<usize>,
    },
    Object(&'static [Field]),
    /// A string or a number (table cells)
    Scalar,
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

const fn required(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        required: true,
        kind,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        required: false,
        kind,
    }
}

/// Schema for one widget type.
#[derive(Debug)]
pub struct BlockSchema {
    pub block_type: BlockType,
    pub fields: &'static [Field],
}

impl BlockSchema {
    /// Names of the top-level fields that must be present.
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }
}

const TEXT: FieldKind = FieldKind::Text(StringFormat::Any);
const COLOR: FieldKind = FieldKind::Text(StringFormat::HexColor);
const URL: FieldKind = FieldKind::Text(StringFormat::Url);
const NUMBER: FieldKind = FieldKind::Number {
    min: None,
    max: None,
    integer: false,
};
const NON_NEGATIVE: FieldKind = FieldKind::Number {
    min: Some(0.0),
    max: None,
    integer: false,
};
const HEIGHT: FieldKind = FieldKind::Number {
    min: Some(100.0),
    max: Some(1000.0),
    integer: true,
};

const DATA_POINT: &[Field] = &[required("name", TEXT), required("value", NUMBER)];

const PIE_SLICE: &[Field] = &[
    required("name", TEXT),
    required("value", NON_NEGATIVE),
    optional("color", COLOR),
];

const RADAR_POINT: &[Field] = &[required("subject", TEXT), required("value", NON_NEGATIVE)];

const SCATTER_POINT: &[Field] = &[
    required("x", NUMBER),
    required("y", NUMBER),
    optional("label", TEXT),
];

const DATA_ITEM: FieldKind = FieldKind::Object(DATA_POINT);
const PIE_ITEM: FieldKind = FieldKind::Object(PIE_SLICE);
const RADAR_ITEM: FieldKind = FieldKind::Object(RADAR_POINT);
const SCATTER_ITEM: FieldKind = FieldKind::Object(SCATTER_POINT);
const TABLE_ROW: FieldKind = FieldKind::List {
    items: &FieldKind::Scalar,
    min_items: 0,
    max_items: None,
};

const fn series(items: &'static FieldKind, min_items: usize, max_items: usize) -> FieldKind {
    FieldKind::List {
        items,
        min_items,
        max_items: Some(max_items),
    }
}

const CARD: &[Field] = &[
    required("title", TEXT),
    optional("description", TEXT),
    optional("content", TEXT),
    optional("footer", TEXT),
    optional("image", URL),
    optional("href", URL),
    optional(
        "variant",
        FieldKind::OneOf(&["default", "outline", "secondary"]),
    ),
];

const ALERT: &[Field] = &[
    optional(
        "variant",
        FieldKind::OneOf(&["default", "destructive", "warning", "success", "info"]),
    ),
    optional("title", TEXT),
    required("description", TEXT),
];

const BADGE: &[Field] = &[
    required("label", TEXT),
    optional(
        "variant",
        FieldKind::OneOf(&["default", "secondary", "destructive", "outline"]),
    ),
    optional("color", COLOR),
];

const BAR_CHART: &[Field] = &[
    optional("title", TEXT),
    required("data", series(&DATA_ITEM, 1, 50)),
    optional("color", COLOR),
    optional("height", HEIGHT),
    optional("xLabel", TEXT),
    optional("yLabel", TEXT),
    optional("horizontal", FieldKind::Boolean),
];

const LINE_CHART: &[Field] = &[
    optional("title", TEXT),
    required("data", series(&DATA_ITEM, 2, 100)),
    optional("color", COLOR),
    optional("height", HEIGHT),
    optional("xLabel", TEXT),
    optional("yLabel", TEXT),
    optional("showDots", FieldKind::Boolean),
];

const AREA_CHART: &[Field] = &[
    optional("title", TEXT),
    required("data", series(&DATA_ITEM, 2, 100)),
    optional("color", COLOR),
    optional("height", HEIGHT),
    optional(
        "fillOpacity",
        FieldKind::Number {
            min: Some(0.0),
            max: Some(1.0),
            integer: false,
        },
    ),
];

const PIE_CHART: &[Field] = &[
    optional("title", TEXT),
    required("data", series(&PIE_ITEM, 1, 12)),
    optional("height", HEIGHT),
    optional("donut", FieldKind::Boolean),
    optional("showLegend", FieldKind::Boolean),
];

const RADAR_CHART: &[Field] = &[
    optional("title", TEXT),
    required("data", series(&RADAR_ITEM, 3, 12)),
    optional("maxValue", NON_NEGATIVE),
    optional("color", COLOR),
    optional("height", HEIGHT),
];

const SCATTER_CHART: &[Field] = &[
    optional("title", TEXT),
    required("data", series(&SCATTER_ITEM, 1, 500)),
    optional("xLabel", TEXT),
    optional("yLabel", TEXT),
    optional("color", COLOR),
    optional("height", HEIGHT),
];

const TABLE: &[Field] = &[
    optional("title", TEXT),
    required("columns", series(&TEXT, 1, 20)),
    required("rows", series(&TABLE_ROW, 0, 1000)),
    optional(
        "pageSize",
        FieldKind::Number {
            min: Some(1.0),
            max: Some(100.0),
            integer: true,
        },
    ),
    optional("caption", TEXT),
    optional("striped", FieldKind::Boolean),
];

macro_rules! schema {
    ($name:ident, $block_type:ident, $fields:expr) => {
        static $name: BlockSchema = BlockSchema {
            block_type: BlockType::$block_type,
            fields: $fields,
        };
    };
}

schema!(CARD_SCHEMA, Card, CARD);
schema!(ALERT_SCHEMA, Alert, ALERT);
schema!(BADGE_SCHEMA, Badge, BADGE);
schema!(BAR_CHART_SCHEMA, BarChart, BAR_CHART);
schema!(LINE_CHART_SCHEMA, LineChart, LINE_CHART);
schema!(AREA_CHART_SCHEMA, AreaChart, AREA_CHART);
schema!(PIE_CHART_SCHEMA, PieChart, PIE_CHART);
schema!(RADAR_CHART_SCHEMA, RadarChart, RADAR_CHART);
schema!(SCATTER_CHART_SCHEMA, ScatterChart, SCATTER_CHART);
schema!(TABLE_SCHEMA, TableJson, TABLE);

/// Look up the schema for a widget type.
pub fn schema_for(block_type: BlockType) -> &'static BlockSchema {
    match block_type {
        BlockType::Card => &CARD_SCHEMA,
        BlockType::Alert => &ALERT_SCHEMA,
        BlockType::Badge => &BADGE_SCHEMA,
        BlockType::BarChart => &BAR_CHART_SCHEMA,
        BlockType::LineChart => &LINE_CHART_SCHEMA,
        BlockType::AreaChart => &AREA_CHART_SCHEMA,
        BlockType::PieChart => &PIE_CHART_SCHEMA,
        BlockType::RadarChart => &RADAR_CHART_SCHEMA,
        BlockType::ScatterChart => &SCATTER_CHART_SCHEMA,
        BlockType::TableJson => &TABLE_SCHEMA,
    }
}

/// Outcome of validating a payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        if errors.is_empty() {
            ValidationResult {
                valid: true,
                errors: None,
            }
        } else {
            ValidationResult {
                valid: false,
                errors: Some(errors),
            }
        }
    }

    /// The error messages, empty when valid.
    pub fn errors(&self) -> &[String] {
        self.errors.as_deref().unwrap_or(&[])
    }
}

/// Validate a payload against the schema registered for `block_type`.
///
/// Unknown block types yield a single `"Unknown block type: <tag>"` error.
pub fn validate_block_data(block_type: &str, data: &Value) -> ValidationResult {
    match BlockType::from_tag(block_type) {
        Some(known) => validate(known, data),
        None => ValidationResult::from_errors(vec![format!("Unknown block type: {block_type}")]),
    }
}

/// Validate a payload for a known widget type.
pub fn validate(block_type: BlockType, data: &Value) -> ValidationResult {
    let mut errors = Vec::new();
    validate_object(schema_for(block_type).fields, data, "", &mut errors);
    ValidationResult::from_errors(errors)
}

/// Validate an annotated payload; raw (non-JSON) bodies are reported as such.
pub fn validate_payload(block_type: BlockType, payload: &Payload) -> ValidationResult {
    match payload {
        Payload::Json(value) => validate(block_type, value),
        Payload::Raw(_) => {
            ValidationResult::from_errors(vec!["/: payload is not valid JSON".to_string()])
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

fn validate_object(fields: &[Field], value: &Value, path: &str, errors: &mut Vec<String>) {
    let Some(object) = value.as_object() else {
        errors.push(format!("{}: expected an object", display_path(path)));
        return;
    };
    for field in fields {
        let field_path = format!("{path}/{}", field.name);
        match object.get(field.name) {
            Some(field_value) => validate_value(&field.kind, field_value, &field_path, errors),
            None if field.required => errors.push(format!("{field_path}: is required")),
            None => {}
        }
    }
}

fn validate_value(kind: &FieldKind, value: &Value, path: &str, errors: &mut Vec<String>) {
    match kind {
        FieldKind::Text(format) => match value.as_str() {
            Some(text) => check_format(*format, text, path, errors),
            None => errors.push(format!("{path}: expected a string")),
        },
        FieldKind::Number { min, max, integer } => {
            let Some(number) = value.as_f64() else {
                errors.push(format!("{path}: expected a number"));
                return;
            };
            if *integer && number.fract() != 0.0 {
                errors.push(format!("{path}: expected an integer"));
            }
            if let Some(min) = min {
                if number < *min {
                    errors.push(format!("{path}: must be at least {min}"));
                }
            }
            if let Some(max) = max {
                if number > *max {
                    errors.push(format!("{path}: must be at most {max}"));
                }
            }
        }
        FieldKind::Boolean => {
            if !value.is_boolean() {
                errors.push(format!("{path}: expected a boolean"));
            }
        }
        FieldKind::OneOf(options) => {
            if !value.as_str().is_some_and(|s| options.contains(&s)) {
                errors.push(format!("{path}: must be one of: {}", options.join(", ")));
            }
        }
        FieldKind::List {
            items,
            min_items,
            max_items,
        } => {
            let Some(list) = value.as_array() else {
                errors.push(format!("{path}: expected an array"));
                return;
            };
            if list.len() < *min_items {
                errors.push(format!("{path}: must contain at least {min_items} items"));
            }
            if let Some(max) = max_items {
                if list.len() > *max {
                    errors.push(format!("{path}: must contain at most {max} items"));
                }
            }
            for (index, item) in list.iter().enumerate() {
                validate_value(items, item, &format!("{path}/{index}"), errors);
            }
        }
        FieldKind::Object(fields) => validate_object(fields, value, path, errors),
        FieldKind::Scalar => {
            if !(value.is_string() || value.is_number()) {
                errors.push(format!("{path}: expected a string or number"));
            }
        }
    }
}

fn check_format(format: StringFormat, text: &str, path: &str, errors: &mut Vec<String>) {
    match format {
        StringFormat::Any => {}
        StringFormat::HexColor => {
            if !is_hex_color(text) {
                errors.push(format!("{path}: must be a hex color like #1a2b3c"));
            }
        }
        StringFormat::Url => {
            if url::Url::parse(text).is_err() {
                errors.push(format!("{path}: must be a valid URL"));
            }
        }
    }
}
