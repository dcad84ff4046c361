//! Attribute values, timestamps and the descriptors shared by all signals.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// A dynamically typed attribute value as the SDK stores it.
///
/// `Number` is the untyped numeric representation; whether it reaches the
/// wire as an integer or a float depends on its runtime value. `Int` is used
/// when the SDK already knows the value is integral.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Null,
    String(String),
    Bool(bool),
    Number(f64),
    Int(i64),
    Array(Vec<AttributeValue>),
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        AttributeValue::Int(n)
    }
}

impl<T: Into<AttributeValue>> From<Vec<T>> for AttributeValue {
    fn from(items: Vec<T>) -> Self {
        AttributeValue::Array(items.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: AttributeValue,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// High-resolution time: whole seconds plus a nanosecond remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HrTime {
    pub seconds: u64,
    pub nanos: u32,
}

impl HrTime {
    /// Builds a time, carrying whole seconds out of `nanos`.
    pub fn new(seconds: u64, nanos: u32) -> Self {
        Self {
            seconds: seconds.saturating_add(u64::from(nanos / NANOS_PER_SECOND)),
            nanos: nanos % NANOS_PER_SECOND,
        }
    }
}

impl From<SystemTime> for HrTime {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(d) => HrTime::new(d.as_secs(), d.subsec_nanos()),
            Err(_) => HrTime::default(),
        }
    }
}

impl From<DateTime<Utc>> for HrTime {
    fn from(time: DateTime<Utc>) -> Self {
        match u64::try_from(time.timestamp()) {
            Ok(seconds) => HrTime::new(seconds, time.timestamp_subsec_nanos()),
            Err(_) => HrTime::default(),
        }
    }
}

/// The library or component that produced a telemetry item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstrumentationScope {
    pub name: String,
    pub version: Option<String>,
    pub schema_url: Option<String>,
}

impl InstrumentationScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// The entity producing telemetry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resource {
    pub attributes: Vec<KeyValue>,
    pub schema_url: Option<String>,
}

impl Resource {
    pub fn new(attributes: Vec<KeyValue>) -> Self {
        Self {
            attributes,
            schema_url: None,
        }
    }
}
