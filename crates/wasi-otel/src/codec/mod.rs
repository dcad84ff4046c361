//! Translation between the in-process model and the wire schema.
//!
//! Codecs are pure functions over value objects. They never suspend and
//! never fail on malformed input they can degrade; the only fallible path is
//! metric encoding, where an aggregation with no wire representation aborts
//! the export pass.

pub mod context;
pub mod log_value;
pub mod logs;
pub mod metrics;
pub mod span;
pub mod value;

pub use context::{
    decode_flags, decode_span_context, decode_trace_state, encode_flags, encode_span_context,
    encode_trace_state, extract_span_context,
};
pub use log_value::serialize_log_value;
pub use logs::encode_log_record;
pub use metrics::{encode_metric, encode_resource_metrics, encode_temporality};
pub use span::{
    decode_status, encode_raw_span_kind, encode_span, encode_span_kind, encode_span_kind_ordinal,
    encode_status,
};
pub use value::{decode_value, encode_key_values, encode_value};
