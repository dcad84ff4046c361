//! Trace identity and span records.

use std::fmt;

use thiserror::Error;

use super::value::{HrTime, InstrumentationScope, KeyValue};

const MAX_TRACE_STATE_ENTRIES: usize = 32;
const MAX_TRACE_STATE_FIELD_LEN: usize = 256;

/// 16-byte trace identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TraceId(pub [u8; 16]);

impl TraceId {
    pub const INVALID: TraceId = TraceId([0; 16]);

    /// 32 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses exactly 32 hex characters.
    pub fn from_hex(s: &str) -> Option<Self> {
        let mut bytes = [0u8; 16];
        hex::decode_to_slice(s, &mut bytes).ok()?;
        Some(TraceId(bytes))
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// 8-byte span identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpanId(pub [u8; 8]);

impl SpanId {
    pub const INVALID: SpanId = SpanId([0; 8]);

    /// 16 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses exactly 16 hex characters.
    pub fn from_hex(s: &str) -> Option<Self> {
        let mut bytes = [0u8; 8];
        hex::decode_to_slice(s, &mut bytes).ok()?;
        Some(SpanId(bytes))
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// W3C trace flags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TraceFlags(pub u8);

impl TraceFlags {
    pub const NONE: TraceFlags = TraceFlags(0x00);
    pub const SAMPLED: TraceFlags = TraceFlags(0x01);

    pub fn is_sampled(&self) -> bool {
        self.0 & Self::SAMPLED.0 == Self::SAMPLED.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceStateError {
    #[error("invalid trace state key: {0:?}")]
    InvalidKey(String),

    #[error("invalid trace state value for key {key:?}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("trace state holds more than 32 entries")]
    TooManyEntries,
}

/// Ordered vendor key/value list. Keys are unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TraceState(Vec<(String, String)>);

impl TraceState {
    pub const NONE: TraceState = TraceState(Vec::new());

    /// Builds a trace state from ordered pairs. A repeated key keeps its
    /// first position and takes the last value written.
    pub fn from_key_value<I, K, V>(entries: I) -> Result<Self, TraceStateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut list: Vec<(String, String)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            if !valid_key(&key) {
                return Err(TraceStateError::InvalidKey(key));
            }
            if !valid_value(&value) {
                return Err(TraceStateError::InvalidValue { key, value });
            }
            match list.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => list.push((key, value)),
            }
        }
        if list.len() > MAX_TRACE_STATE_ENTRIES {
            return Err(TraceStateError::TooManyEntries);
        }
        Ok(TraceState(list))
    }

    /// The `k=v,k=v` header form.
    pub fn header(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn valid_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    match bytes.first() {
        Some(first) if bytes.len() <= MAX_TRACE_STATE_FIELD_LEN => {
            (first.is_ascii_lowercase() || first.is_ascii_digit())
                && bytes.iter().all(|&b| {
                    b.is_ascii_lowercase()
                        || b.is_ascii_digit()
                        || matches!(b, b'_' | b'-' | b'*' | b'/' | b'@')
                })
        }
        _ => false,
    }
}

fn valid_value(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_TRACE_STATE_FIELD_LEN
        && !value.ends_with(' ')
        && value
            .bytes()
            .all(|b| (0x20..=0x7e).contains(&b) && b != b',')
}

/// Identifying trace information about a span.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpanContext {
    pub trace_id: TraceId,
    pub span_id: SpanId,
    pub trace_flags: TraceFlags,
    pub is_remote: bool,
    pub trace_state: TraceState,
}

impl SpanContext {
    pub const INVALID: SpanContext = SpanContext {
        trace_id: TraceId::INVALID,
        span_id: SpanId::INVALID,
        trace_flags: TraceFlags::NONE,
        is_remote: false,
        trace_state: TraceState::NONE,
    };

    pub fn new(
        trace_id: TraceId,
        span_id: SpanId,
        trace_flags: TraceFlags,
        is_remote: bool,
        trace_state: TraceState,
    ) -> Self {
        Self {
            trace_id,
            span_id,
            trace_flags,
            is_remote,
            trace_state,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.trace_id.is_valid() && self.span_id.is_valid()
    }
}

/// The SDK-side propagation context. Only the active span context is
/// modelled; everything else the SDK stores there is opaque to the bridge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Context {
    span_context: Option<SpanContext>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this context whose active parent is `span_context`,
    /// marked remote.
    pub fn with_remote_span_context(&self, mut span_context: SpanContext) -> Self {
        span_context.is_remote = true;
        Self {
            span_context: Some(span_context),
        }
    }

    pub fn span_context(&self) -> Option<&SpanContext> {
        self.span_context.as_ref()
    }
}

/// The SDK's span kind enumeration, in the SDK's declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum SpanKind {
    #[default]
    Internal = 0,
    Server = 1,
    Client = 2,
    Producer = 3,
    Consumer = 4,
}

/// Status as the SDK stores it: a numeric code and an optional message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpanStatus {
    pub code: i32,
    pub message: Option<String>,
}

impl SpanStatus {
    pub const UNSET: i32 = 0;
    pub const OK: i32 = 1;
    pub const ERROR: i32 = 2;

    pub fn unset() -> Self {
        Self::default()
    }

    pub fn ok() -> Self {
        Self {
            code: Self::OK,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: Self::ERROR,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvent {
    pub name: String,
    pub time: HrTime,
    pub attributes: Vec<KeyValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub context: SpanContext,
    pub attributes: Vec<KeyValue>,
}

/// A span as seen by processor hooks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadableSpan {
    pub name: String,
    pub kind: SpanKind,
    pub span_context: SpanContext,
    pub parent_span_id: Option<SpanId>,
    pub start_time: HrTime,
    pub end_time: HrTime,
    pub attributes: Vec<KeyValue>,
    pub events: Vec<TimedEvent>,
    pub links: Vec<Link>,
    pub status: SpanStatus,
    pub instrumentation_scope: InstrumentationScope,
    pub dropped_attributes_count: u32,
    pub dropped_events_count: u32,
    pub dropped_links_count: u32,
}
