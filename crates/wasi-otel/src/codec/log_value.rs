//! Log value serializer.
//!
//! The wire log body is one opaque string, so structured values are rendered
//! as JSON. JSON has no byte type; bytes become a base64 data URI string and
//! do not round-trip back to binary.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::sdk::logs::LogValue;

const BYTES_PREFIX: &str = "data:application/octet-stream;base64,";

impl Serialize for LogValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LogValue::Bytes(bytes) => {
                serializer.serialize_str(&format!("{BYTES_PREFIX}{}", STANDARD.encode(bytes)))
            }
            LogValue::Null => serializer.serialize_unit(),
            LogValue::String(s) => serializer.serialize_str(s),
            LogValue::Bool(b) => serializer.serialize_bool(*b),
            LogValue::Int(n) => serializer.serialize_i64(*n),
            LogValue::Double(n) => serializer.serialize_f64(*n),
            LogValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            LogValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Renders a log value as its wire string. Non-finite doubles render as
/// `null`.
pub fn serialize_log_value(value: &LogValue) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        warn!(error = %err, "failed to serialize log value");
        "null".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_nested_map() {
        let value = LogValue::Map(vec![
            ("key1".into(), false.into()),
            ("key2".into(), 123.456.into()),
            ("key3".into(), 41i64.into()),
            ("key4".into(), LogValue::Bytes(b"Hello, world!".to_vec())),
            ("key5".into(), "This is a string".into()),
            (
                "key6".into(),
                LogValue::Array(vec![1i64.into(), 2i64.into(), 3i64.into()]),
            ),
            (
                "key7".into(),
                LogValue::Map(vec![("nestedkey1".into(), "Hello, from within!".into())]),
            ),
        ]);

        let actual: serde_json::Value = serde_json::from_str(&serialize_log_value(&value)).unwrap();
        let expected = json!({
            "key1": false,
            "key2": 123.456,
            "key3": 41,
            "key4": "data:application/octet-stream;base64,SGVsbG8sIHdvcmxkIQ==",
            "key5": "This is a string",
            "key6": [1, 2, 3],
            "key7": {
                "nestedkey1": "Hello, from within!"
            }
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(serialize_log_value(&LogValue::Null), "null");
        assert_eq!(serialize_log_value(&"a\"b".into()), r#""a\"b""#);
        assert_eq!(serialize_log_value(&LogValue::Double(f64::NAN)), "null");
        assert_eq!(serialize_log_value(&LogValue::Bytes(vec![])), format!("\"{BYTES_PREFIX}\""));
    }

    #[test]
    fn test_serialize_keeps_map_order() {
        let value = LogValue::Map(vec![("z".into(), 1i64.into()), ("a".into(), 2i64.into())]);
        assert_eq!(serialize_log_value(&value), r#"{"z":1,"a":2}"#);
    }
}
