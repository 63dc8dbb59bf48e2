//! Numeric Normalizer
//!
//! Market data providers are loose about numeric fields: the same quote field
//! may arrive as a JSON number, `null`, or a display string such as
//! `"$5,000"`. Everything funnels through [`clean_number`], which never fails.

use serde_json::Value;

/// Coerce a numeric-like JSON value into an `f64`.
///
/// - `null` becomes `0.0`
/// - numbers are cast directly
/// - strings keep only ASCII digits and `.`, then parse; an empty or
///   unparseable remainder becomes `0.0`
/// - any other shape is treated as its textual form
pub fn clean_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_stripped(s),
        other => parse_stripped(&other.to_string()),
    }
}

/// Same as [`clean_number`] for an optional value (missing field).
pub fn clean_optional(value: Option<&Value>) -> f64 {
    value.map(clean_number).unwrap_or(0.0)
}

fn parse_stripped(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return 0.0;
    }

    cleaned.parse::<f64>().unwrap_or(0.0)
}
