//! The `wasi:otel/tracing` interface.

use serde::{Deserialize, Serialize};

use super::types::{Datetime, InstrumentationScope, KeyValue};

/// Flags that can be set on a span context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TraceFlags {
    /// Whether the span should be sampled or not.
    pub sampled: bool,
}

impl TraceFlags {
    pub const SAMPLED: TraceFlags = TraceFlags { sampled: true };
    pub const NONE: TraceFlags = TraceFlags { sampled: false };
}

/// Vendor key/value list. Invalid content on decode yields an empty state.
pub type TraceState = Vec<(String, String)>;

/// Identifying trace information about a span.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpanContext {
    /// 16 bytes as 32 lowercase hex characters.
    pub trace_id: String,
    /// 8 bytes as 16 lowercase hex characters.
    pub span_id: String,
    pub trace_flags: TraceFlags,
    pub is_remote: bool,
    pub trace_state: TraceState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanKind {
    Client,
    Server,
    Producer,
    Consumer,
    Internal,
}

/// An event describing a specific moment in time on a span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub time: Datetime,
    pub attributes: Vec<KeyValue>,
}

/// A relationship to another span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub span_context: SpanContext,
    pub attributes: Vec<KeyValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "val", rename_all = "kebab-case")]
pub enum Status {
    Unset,
    Ok,
    Error(String),
}

/// The data associated with a span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanData {
    pub span_context: SpanContext,
    /// Empty for root spans.
    pub parent_span_id: String,
    pub span_kind: SpanKind,
    pub name: String,
    pub start_time: Datetime,
    pub end_time: Datetime,
    pub attributes: Vec<KeyValue>,
    pub events: Vec<Event>,
    pub links: Vec<Link>,
    pub status: Status,
    pub instrumentation_scope: InstrumentationScope,
    pub dropped_attributes: u32,
    pub dropped_events: u32,
    pub dropped_links: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tagged_shape() {
        assert_eq!(
            serde_json::to_value(Status::Unset).unwrap(),
            serde_json::json!({"tag": "unset"})
        );
        assert_eq!(
            serde_json::to_value(Status::Error("x".into())).unwrap(),
            serde_json::json!({"tag": "error", "val": "x"})
        );
    }
}
