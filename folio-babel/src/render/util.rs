//! Payload coercion for renderers.
//!
//! Renderers receive whatever JSON the author wrote, valid or not. These helpers never fail:
//! a missing or mistyped field reads as absent, and arrays are checked before iteration.

use crate::blocks::schema::is_hex_color;
use serde_json::Value;

/// Text form of a scalar. Objects and arrays render as compact JSON, null as empty.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Numeric form of a value. Numeric strings count; anything else is `None`.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Non-empty string field.
pub fn text_field(data: &Value, key: &str) -> Option<String> {
    data.get(key)
        .map(value_to_string)
        .filter(|text| !text.trim().is_empty())
}

pub fn number_field(data: &Value, key: &str) -> Option<f64> {
    data.get(key).and_then(as_number)
}

pub fn bool_field(data: &Value, key: &str, default: bool) -> bool {
    data.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Array field, or an empty slice when absent or not an array.
pub fn array_field<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Hex color field, or `default` when absent or malformed.
pub fn color_field(data: &Value, key: &str, default: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .filter(|color| is_hex_color(color))
        .unwrap_or(default)
        .to_string()
}

/// One of `allowed`, or the first entry.
pub fn variant_field(data: &Value, key: &str, allowed: &[&'static str]) -> &'static str {
    let requested = data.get(key).and_then(Value::as_str);
    allowed
        .iter()
        .copied()
        .find(|variant| Some(*variant) == requested)
        .unwrap_or(allowed[0])
}

/// Compact number formatting: integers lose the `.0`, others keep two decimals at most.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        let text = format!("{n:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
