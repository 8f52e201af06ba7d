//! Tolerant decoding for numbers the backend stores inconsistently.
//!
//! Depending on the store behind an endpoint, a counter or score may arrive
//! as `7`, `7.0` or `"7"`. Anything that does not read as a finite number is
//! treated as absent rather than failing the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a JSON value as a finite number, accepting numeric strings.
pub fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Reads a JSON value as a non-negative whole count.
pub fn as_count(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let number = as_number(value)?;
    (number >= 0.0 && number.fract() == 0.0).then_some(number as u64)
}

/// Reads a JSON scalar as display text.
pub fn as_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(as_number))
}

pub(crate) fn optional_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(as_count))
}

pub(crate) fn label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(as_label)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_numeric_strings_are_read() {
        assert_eq!(as_number(&json!(7)), Some(7.0));
        assert_eq!(as_number(&json!(7.5)), Some(7.5));
        assert_eq!(as_number(&json!(" 6.25 ")), Some(6.25));
    }

    #[test]
    fn non_numeric_values_are_absent() {
        assert_eq!(as_number(&json!("happy")), None);
        assert_eq!(as_number(&json!("NaN")), None);
        assert_eq!(as_number(&json!([1])), None);
        assert_eq!(as_number(&json!(null)), None);
    }

    #[test]
    fn counts_accept_whole_floats_and_strings() {
        assert_eq!(as_count(&json!(12)), Some(12));
        assert_eq!(as_count(&json!(12.0)), Some(12));
        assert_eq!(as_count(&json!("12")), Some(12));
        assert_eq!(as_count(&json!(1.5)), None);
        assert_eq!(as_count(&json!(-3)), None);
    }

    #[test]
    fn labels_render_scalars() {
        assert_eq!(as_label(&json!("Mon")), Some("Mon".to_string()));
        assert_eq!(as_label(&json!(3)), Some("3".to_string()));
        assert_eq!(as_label(&json!({"a": 1})), None);
    }
}
