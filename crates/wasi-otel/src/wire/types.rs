//! Types shared by all `wasi:otel` interfaces.

use serde::{Deserialize, Serialize};

/// Wall-clock time as seconds and a nanosecond remainder since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Datetime {
    pub seconds: u64,
    pub nanoseconds: u32,
}

impl Datetime {
    /// Sentinel used where a timestamp is required but the source has none.
    pub const ZERO: Datetime = Datetime {
        seconds: 0,
        nanoseconds: 0,
    };
}

/// The value part of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "val", rename_all = "kebab-case")]
pub enum Value {
    String(String),
    Bool(bool),
    F64(f64),
    S64(i64),
    StringArray(Vec<String>),
    BoolArray(Vec<bool>),
    F64Array(Vec<f64>),
    S64Array(Vec<i64>),
}

/// A key-value pair describing an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: Value,
}

/// An immutable representation of the entity producing telemetry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Resource {
    pub attributes: Vec<KeyValue>,
    pub schema_url: Option<String>,
}

/// Describes the instrumentation scope that produced telemetry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstrumentationScope {
    pub name: String,
    pub version: Option<String>,
    pub schema_url: Option<String>,
    pub attributes: Vec<KeyValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_tagged_shape() {
        let json = serde_json::to_value(Value::S64(41)).unwrap();
        assert_eq!(json, serde_json::json!({"tag": "s64", "val": 41}));

        let json = serde_json::to_value(Value::StringArray(vec!["a".into()])).unwrap();
        assert_eq!(json, serde_json::json!({"tag": "string-array", "val": ["a"]}));
    }
}
