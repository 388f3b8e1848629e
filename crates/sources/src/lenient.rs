//! Serde helpers for loosely typed upstream JSON.
//!
//! The map provider encodes an empty string field as `[]`, and the
//! workflow output mixes numbers and numeric strings. These helpers read
//! such fields without failing the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A string field that may arrive as a string, a number, `null`, or `[]`.
///
/// Anything that is not a string or number reads as empty.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// A float that may arrive as a number or a numeric string.
///
/// Unparseable, non-finite, or otherwise shaped values read as `None`.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}
