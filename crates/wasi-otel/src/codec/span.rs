//! Span codec.
//!
//! Span kinds map positionally through [`SPAN_KINDS`], which follows the
//! SDK's declared enumeration order. Both sides must change together.

use tracing::warn;

use super::context::encode_span_context;
use super::value::encode_key_values;
use crate::sdk::trace::{Link, ReadableSpan, SpanKind, SpanStatus, TimedEvent};
use crate::sdk::value::{HrTime, InstrumentationScope};
use crate::wire;

/// Wire kinds indexed by the SDK's span kind ordinal.
pub const SPAN_KINDS: [wire::tracing::SpanKind; 5] = [
    wire::tracing::SpanKind::Internal,
    wire::tracing::SpanKind::Server,
    wire::tracing::SpanKind::Client,
    wire::tracing::SpanKind::Producer,
    wire::tracing::SpanKind::Consumer,
];

/// Maps a raw SDK kind ordinal. `None` when out of range.
pub fn encode_span_kind_ordinal(ordinal: u32) -> Option<wire::tracing::SpanKind> {
    usize::try_from(ordinal)
        .ok()
        .and_then(|i| SPAN_KINDS.get(i).copied())
}

/// Maps a raw SDK kind ordinal, falling back to internal when it is out of
/// range.
pub fn encode_raw_span_kind(ordinal: u32) -> wire::tracing::SpanKind {
    encode_span_kind_ordinal(ordinal).unwrap_or_else(|| {
        warn!(ordinal, "unknown span kind, using internal");
        wire::tracing::SpanKind::Internal
    })
}

pub fn encode_span_kind(kind: SpanKind) -> wire::tracing::SpanKind {
    SPAN_KINDS[kind as usize]
}

/// `0` is unset, `1` ok, `2` error. Undefined codes are errors with an
/// empty message.
pub fn encode_status(status: &SpanStatus) -> wire::tracing::Status {
    match status.code {
        SpanStatus::UNSET => wire::tracing::Status::Unset,
        SpanStatus::OK => wire::tracing::Status::Ok,
        SpanStatus::ERROR => {
            wire::tracing::Status::Error(status.message.clone().unwrap_or_default())
        }
        code => {
            warn!(code, "undefined span status code, treating as error");
            wire::tracing::Status::Error(String::new())
        }
    }
}

pub fn decode_status(status: &wire::tracing::Status) -> SpanStatus {
    match status {
        wire::tracing::Status::Unset => SpanStatus::unset(),
        wire::tracing::Status::Ok => SpanStatus::ok(),
        wire::tracing::Status::Error(message) => SpanStatus::error(message.clone()),
    }
}

pub fn encode_time(time: HrTime) -> wire::Datetime {
    wire::Datetime {
        seconds: time.seconds,
        nanoseconds: time.nanos,
    }
}

/// Scope attributes are not exposed by the SDK, so they are always empty.
pub fn encode_scope(scope: &InstrumentationScope) -> wire::InstrumentationScope {
    wire::InstrumentationScope {
        name: scope.name.clone(),
        version: scope.version.clone(),
        schema_url: scope.schema_url.clone(),
        attributes: Vec::new(),
    }
}

fn encode_event(event: &TimedEvent) -> wire::tracing::Event {
    wire::tracing::Event {
        name: event.name.clone(),
        time: encode_time(event.time),
        attributes: encode_key_values(&event.attributes),
    }
}

fn encode_link(link: &Link) -> wire::tracing::Link {
    wire::tracing::Link {
        span_context: encode_span_context(&link.context),
        attributes: encode_key_values(&link.attributes),
    }
}

/// Encodes a finished or in-flight span. A root span's parent id is the
/// empty string.
pub fn encode_span(span: &ReadableSpan) -> wire::tracing::SpanData {
    wire::tracing::SpanData {
        span_context: encode_span_context(&span.span_context),
        parent_span_id: span
            .parent_span_id
            .map(|id| id.to_hex())
            .unwrap_or_default(),
        span_kind: encode_span_kind(span.kind),
        name: span.name.clone(),
        start_time: encode_time(span.start_time),
        end_time: encode_time(span.end_time),
        attributes: encode_key_values(&span.attributes),
        events: span.events.iter().map(encode_event).collect(),
        links: span.links.iter().map(encode_link).collect(),
        status: encode_status(&span.status),
        instrumentation_scope: encode_scope(&span.instrumentation_scope),
        dropped_attributes: span.dropped_attributes_count,
        dropped_events: span.dropped_events_count,
        dropped_links: span.dropped_links_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::trace::{SpanContext, SpanId, TraceFlags, TraceId, TraceState};
    use crate::sdk::value::KeyValue;
    use wire::tracing::SpanKind as WireKind;

    fn sample_span() -> ReadableSpan {
        ReadableSpan {
            name: "GET /users".into(),
            kind: SpanKind::Server,
            span_context: SpanContext::new(
                TraceId([7; 16]),
                SpanId([9; 8]),
                TraceFlags::SAMPLED,
                false,
                TraceState::default(),
            ),
            start_time: HrTime::new(10, 5),
            end_time: HrTime::new(11, 0),
            attributes: vec![KeyValue::new("http.status_code", 200.0)],
            events: vec![
                TimedEvent {
                    name: "first".into(),
                    time: HrTime::new(10, 6),
                    attributes: vec![],
                },
                TimedEvent {
                    name: "second".into(),
                    time: HrTime::new(10, 7),
                    attributes: vec![KeyValue::new("k", "v")],
                },
            ],
            links: vec![Link {
                context: SpanContext::new(
                    TraceId([1; 16]),
                    SpanId([2; 8]),
                    TraceFlags::NONE,
                    true,
                    TraceState::default(),
                ),
                attributes: vec![],
            }],
            status: SpanStatus::error("boom"),
            instrumentation_scope: InstrumentationScope::new("router").with_version("1.0"),
            dropped_attributes_count: 1,
            dropped_events_count: 2,
            dropped_links_count: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_span_kind_ordinals() {
        let expected = [
            WireKind::Internal,
            WireKind::Server,
            WireKind::Client,
            WireKind::Producer,
            WireKind::Consumer,
        ];
        for (i, kind) in expected.iter().enumerate() {
            assert_eq!(encode_span_kind_ordinal(i as u32), Some(*kind));
        }
        assert_eq!(encode_span_kind_ordinal(2), Some(WireKind::Client));
        assert_eq!(encode_span_kind_ordinal(5), None);
        assert_eq!(encode_raw_span_kind(2), WireKind::Client);
        assert_eq!(encode_raw_span_kind(5), WireKind::Internal);
        assert_eq!(encode_raw_span_kind(u32::MAX), WireKind::Internal);
        assert_eq!(encode_span_kind(SpanKind::Client), WireKind::Client);
        assert_eq!(encode_span_kind(SpanKind::Consumer), WireKind::Consumer);
        assert_eq!(encode_span_kind(SpanKind::Internal), WireKind::Internal);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [SpanStatus::unset(), SpanStatus::ok()] {
            assert_eq!(decode_status(&encode_status(&status)).code, status.code);
        }
        let err = SpanStatus::error("x");
        let wire = encode_status(&err);
        assert_eq!(wire, wire::tracing::Status::Error("x".into()));
        assert_eq!(decode_status(&wire), err);
    }

    #[test]
    fn test_status_edge_codes() {
        let no_message = SpanStatus {
            code: SpanStatus::ERROR,
            message: None,
        };
        assert_eq!(encode_status(&no_message), wire::tracing::Status::Error(String::new()));

        let undefined = SpanStatus {
            code: 7,
            message: Some("ignored".into()),
        };
        assert_eq!(encode_status(&undefined), wire::tracing::Status::Error(String::new()));
    }

    #[test]
    fn test_encode_span() {
        let span = sample_span();
        let wire = encode_span(&span);

        assert_eq!(wire.name, "GET /users");
        assert_eq!(wire.span_kind, WireKind::Server);
        assert_eq!(wire.parent_span_id, "");
        assert_eq!(wire.span_context.span_id, "0909090909090909");
        assert_eq!(wire.start_time, wire::Datetime { seconds: 10, nanoseconds: 5 });
        assert_eq!(wire.attributes[0].value, wire::Value::S64(200));
        assert_eq!(wire.events.len(), 2);
        assert_eq!(wire.events[0].name, "first");
        assert_eq!(wire.events[1].name, "second");
        assert!(wire.links[0].span_context.is_remote);
        assert_eq!(wire.status, wire::tracing::Status::Error("boom".into()));
        assert_eq!(wire.instrumentation_scope.version.as_deref(), Some("1.0"));
        assert!(wire.instrumentation_scope.attributes.is_empty());
        assert_eq!(
            (wire.dropped_attributes, wire.dropped_events, wire.dropped_links),
            (1, 2, 3)
        );
    }

    #[test]
    fn test_encode_span_with_parent() {
        let span = ReadableSpan {
            parent_span_id: Some(SpanId([0xaa; 8])),
            ..sample_span()
        };
        assert_eq!(encode_span(&span).parent_span_id, "aaaaaaaaaaaaaaaa");
    }
}
