//! The `wasi:otel/logs` interface.
//!
//! Log bodies and attribute values are opaque strings here: the recursive
//! log value has no wire variant, so it travels pre-serialized.

use serde::{Deserialize, Serialize};

use super::tracing::TraceFlags;
use super::types::{Datetime, InstrumentationScope};

/// Attribute whose value is an encoded log value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resource {
    pub attributes: Vec<KeyValue>,
    pub schema_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: Option<Datetime>,
    pub observed_timestamp: Option<Datetime>,
    pub severity_text: Option<String>,
    pub severity_number: Option<u8>,
    pub body: Option<String>,
    pub attributes: Option<Vec<KeyValue>>,
    pub event_name: Option<String>,
    pub resource: Option<Resource>,
    pub instrumentation_scope: Option<InstrumentationScope>,
    pub trace_id: Option<String>,
    pub span_id: Option<String>,
    pub trace_flags: Option<TraceFlags>,
}
