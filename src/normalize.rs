//! Shared normalization helpers.
//!
//! Upstream recipe records are loosely typed. These helpers turn the raw
//! JSON shapes into the plain values the classifier and the filter/sorter
//! work with. None of them fail: anything that cannot be understood
//! degrades to an empty string, an empty list, `None` or the epoch.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Split a delimited ingredient string on newlines and commas.
///
/// Entries are trimmed and empty entries are dropped.
pub fn split_delimited(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize an ingredient string that may hold a JSON-encoded array.
///
/// A string that parses as a JSON array is treated as a list; anything
/// else falls back to comma/newline splitting.
pub fn ingredients_from_text(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        if let Ok(items) = serde_json::from_str::<Vec<Value>>(trimmed) {
            return ingredients_from_list(&items);
        }
    }
    split_delimited(trimmed)
}

/// Normalize a JSON list of ingredient entries.
///
/// String entries are trimmed, numbers are rendered as text, anything else
/// is dropped.
pub fn ingredients_from_list(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|item| !item.is_empty())
        .collect()
}

/// Text of a scalar JSON value; `None` for null, objects, arrays and bools.
pub fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-negative minutes from a JSON number or numeric string, rounded down.
pub fn minutes_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(whole) => u32::try_from(whole).ok(),
            None => n.as_f64().and_then(floor_minutes),
        },
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(floor_minutes))
        }
        _ => None,
    }
}

fn floor_minutes(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value <= u32::MAX as f64 {
        Some(value.floor() as u32)
    } else {
        None
    }
}

/// Finite number from a JSON number or numeric string.
pub fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Milliseconds since the Unix epoch for a timestamp string, or 0 when the
/// string is not a recognizable date.
///
/// Accepts RFC 3339 (`2024-05-01T12:30:00Z`), naive date-times with
/// optional fractional seconds (`2024-05-01T12:30:00.123456`, read as UTC)
/// and plain dates (`2024-05-01`).
pub fn timestamp_millis(text: &str) -> i64 {
    let text = text.trim();
    if text.is_empty() {
        return 0;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return dt.timestamp_millis();
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return dt.and_utc().timestamp_millis();
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// Lowercase, space-joined text of the non-empty parts.
pub fn lowercase_blob<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
