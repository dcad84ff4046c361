//! Attribute value codec.
//!
//! Numbers are disambiguated by runtime value: an integral float travels as
//! `s64`, anything else as `f64`. This means `5.0` and `5.5` carry different
//! tags; consumers rely on that, so it is kept as is.
//!
//! Arrays are typed by their first non-null element. Remaining elements are
//! coerced to that kind without validation.

use crate::sdk::value::{AttributeValue, KeyValue, Resource};
use crate::wire;

/// Encodes a single attribute value.
pub fn encode_value(value: &AttributeValue) -> wire::Value {
    match value {
        AttributeValue::String(s) => wire::Value::String(s.clone()),
        AttributeValue::Bool(b) => wire::Value::Bool(*b),
        AttributeValue::Int(n) => wire::Value::S64(*n),
        AttributeValue::Number(n) => match as_integral(*n) {
            Some(i) => wire::Value::S64(i),
            None => wire::Value::F64(*n),
        },
        AttributeValue::Array(items) => encode_array(items),
        AttributeValue::Null => wire::Value::String(String::new()),
    }
}

pub fn encode_key_values(attributes: &[KeyValue]) -> Vec<wire::KeyValue> {
    attributes
        .iter()
        .map(|kv| wire::KeyValue {
            key: kv.key.clone(),
            value: encode_value(&kv.value),
        })
        .collect()
}

pub fn encode_resource(resource: &Resource) -> wire::Resource {
    wire::Resource {
        attributes: encode_key_values(&resource.attributes),
        schema_url: resource.schema_url.clone(),
    }
}

/// Decodes a wire value. `s64` comes back as `Int`, `f64` as `Number`.
pub fn decode_value(value: &wire::Value) -> AttributeValue {
    match value {
        wire::Value::String(s) => AttributeValue::String(s.clone()),
        wire::Value::Bool(b) => AttributeValue::Bool(*b),
        wire::Value::F64(n) => AttributeValue::Number(*n),
        wire::Value::S64(n) => AttributeValue::Int(*n),
        wire::Value::StringArray(v) => {
            AttributeValue::Array(v.iter().cloned().map(AttributeValue::String).collect())
        }
        wire::Value::BoolArray(v) => {
            AttributeValue::Array(v.iter().copied().map(AttributeValue::Bool).collect())
        }
        wire::Value::F64Array(v) => {
            AttributeValue::Array(v.iter().copied().map(AttributeValue::Number).collect())
        }
        wire::Value::S64Array(v) => {
            AttributeValue::Array(v.iter().copied().map(AttributeValue::Int).collect())
        }
    }
}

fn encode_array(items: &[AttributeValue]) -> wire::Value {
    let items: Vec<&AttributeValue> = items
        .iter()
        .filter(|v| !matches!(v, AttributeValue::Null))
        .collect();

    let Some(first) = items.first() else {
        return wire::Value::StringArray(Vec::new());
    };

    match first {
        AttributeValue::Bool(_) => {
            wire::Value::BoolArray(items.iter().map(|v| coerce_bool(v)).collect())
        }
        AttributeValue::Number(_) | AttributeValue::Int(_) => {
            let numbers: Vec<f64> = items.iter().map(|v| coerce_f64(v)).collect();
            let integers: Option<Vec<i64>> = items.iter().map(|v| coerce_i64(v)).collect();
            match integers {
                Some(ints) => wire::Value::S64Array(ints),
                None => wire::Value::F64Array(numbers),
            }
        }
        _ => wire::Value::StringArray(items.iter().map(|v| coerce_string(v)).collect()),
    }
}

/// Returns the value as `i64` if it is finite, integral and in range.
fn as_integral(n: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

fn coerce_i64(value: &AttributeValue) -> Option<i64> {
    match value {
        AttributeValue::Int(n) => Some(*n),
        other => as_integral(coerce_f64(other)),
    }
}

fn coerce_f64(value: &AttributeValue) -> f64 {
    match value {
        AttributeValue::Number(n) => *n,
        AttributeValue::Int(n) => *n as f64,
        AttributeValue::Bool(b) => f64::from(u8::from(*b)),
        AttributeValue::String(s) => s.trim().parse().unwrap_or(0.0),
        AttributeValue::Null | AttributeValue::Array(_) => 0.0,
    }
}

fn coerce_bool(value: &AttributeValue) -> bool {
    match value {
        AttributeValue::Bool(b) => *b,
        AttributeValue::Number(n) => *n != 0.0 && !n.is_nan(),
        AttributeValue::Int(n) => *n != 0,
        AttributeValue::String(s) => !s.is_empty(),
        AttributeValue::Null => false,
        AttributeValue::Array(_) => true,
    }
}

fn coerce_string(value: &AttributeValue) -> String {
    match value {
        AttributeValue::String(s) => s.clone(),
        AttributeValue::Bool(b) => b.to_string(),
        AttributeValue::Number(n) => n.to_string(),
        AttributeValue::Int(n) => n.to_string(),
        AttributeValue::Null | AttributeValue::Array(_) => String::new(),
    }
}
