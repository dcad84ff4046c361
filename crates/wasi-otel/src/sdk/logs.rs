//! Log records and their recursive value type.

use super::value::{AttributeValue, HrTime, InstrumentationScope, Resource};

/// A structured log value. Unlike attribute values, log values nest.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Null,
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
    Bytes(Vec<u8>),
    Array(Vec<LogValue>),
    Map(Vec<(String, LogValue)>),
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::String(s.to_string())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::String(s)
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<i64> for LogValue {
    fn from(n: i64) -> Self {
        LogValue::Int(n)
    }
}

impl From<f64> for LogValue {
    fn from(n: f64) -> Self {
        LogValue::Double(n)
    }
}

impl From<&AttributeValue> for LogValue {
    fn from(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Null => LogValue::Null,
            AttributeValue::String(s) => LogValue::String(s.clone()),
            AttributeValue::Bool(b) => LogValue::Bool(*b),
            AttributeValue::Number(n) => LogValue::Double(*n),
            AttributeValue::Int(n) => LogValue::Int(*n),
            AttributeValue::Array(items) => LogValue::Array(items.iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogRecord {
    pub hr_time: Option<HrTime>,
    pub hr_time_observed: Option<HrTime>,
    pub severity_text: Option<String>,
    pub severity_number: Option<u8>,
    pub body: Option<LogValue>,
    pub attributes: Vec<(String, LogValue)>,
    pub event_name: Option<String>,
    pub resource: Option<Resource>,
    pub instrumentation_scope: Option<InstrumentationScope>,
}
