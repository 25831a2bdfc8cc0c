//! Forgiving field deserializers.
//!
//! The backend serialises flags as `0`/`1`, sometimes as booleans, and
//! numeric aggregates may come back as floats or strings. These helpers read
//! whatever is there and fall back to a neutral value instead of failing the
//! whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::time::{Timestamp, parse_timestamp};

/// Number or numeric string; anything else (including `null`) reads as `0.0`.
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

/// Boolean, non-zero number, or `"1"`/`"true"` string.
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(flag_from_value(&value))
}

/// Non-negative integer count from a number or numeric string.
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

/// Like [`count`], but `null`, missing and non-numeric values read as `None`.
pub fn optional_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(_) => Some(count_from_value(&value)),
        Value::String(s) if s.trim().parse::<f64>().is_ok() => Some(count_from_value(&value)),
        _ => None,
    })
}

/// String or number rendered as a string.
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Like [`string`], but anything that is not a string or number reads as `None`.
pub fn optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// RFC 3339 timestamp, or a naive one taken as UTC.
pub fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

/// Nested object that falls back to its default when the shape is wrong.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Numeric reading of a JSON value.
#[must_use]
pub fn number_from_value(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Truthiness of a JSON value, as the backend encodes flags.
#[must_use]
pub fn flag_from_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(x) = s.parse::<f64>() {
                x != 0.0
            } else {
                s.eq_ignore_ascii_case("true")
            }
        }
        _ => false,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_from_value(value: &Value) -> u64 {
    number_from_value(value).max(0.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_read_numbers_and_numeric_strings() {
        assert!((number_from_value(&json!(42.5)) - 42.5).abs() < f64::EPSILON);
        assert!((number_from_value(&json!(" 12 ")) - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_read_non_numeric_as_zero() {
        assert!(number_from_value(&json!("wet")).abs() < f64::EPSILON);
        assert!(number_from_value(&json!(null)).abs() < f64::EPSILON);
        assert!(number_from_value(&json!({"pct": 3})).abs() < f64::EPSILON);
        assert!(number_from_value(&json!("NaN")).abs() < f64::EPSILON);
    }

    #[test]
    fn should_read_flags() {
        assert!(flag_from_value(&json!(1)));
        assert!(flag_from_value(&json!(true)));
        assert!(flag_from_value(&json!("1")));
        assert!(flag_from_value(&json!("TRUE")));
        assert!(!flag_from_value(&json!(0)));
        assert!(!flag_from_value(&json!("0")));
        assert!(!flag_from_value(&json!("false")));
        assert!(!flag_from_value(&json!(null)));
    }

    #[test]
    fn should_round_float_counts() {
        #[derive(Deserialize)]
        struct Counts {
            #[serde(deserialize_with = "count")]
            total: u64,
            #[serde(default, deserialize_with = "optional_count")]
            seq: Option<u64>,
        }
        let c: Counts = serde_json::from_value(json!({"total": 12.0, "seq": null})).unwrap();
        assert_eq!(c.total, 12);
        assert!(c.seq.is_none());

        let c: Counts = serde_json::from_value(json!({"total": -3, "seq": "17"})).unwrap();
        assert_eq!(c.total, 0);
        assert_eq!(c.seq, Some(17));
    }

    #[test]
    fn should_fall_back_to_default_for_wrong_nested_shape() {
        #[derive(Debug, Default, PartialEq, Deserialize)]
        struct Inner {
            #[serde(default)]
            pct: f64,
        }
        #[derive(Deserialize)]
        struct Outer {
            #[serde(default, deserialize_with = "or_default")]
            soil: Inner,
        }
        let outer: Outer = serde_json::from_value(json!({"soil": 5})).unwrap();
        assert_eq!(outer.soil, Inner::default());
    }
}
