//! Trace context codec.
//!
//! Trace state travels as an ordered list of pairs. Each entry of the
//! `k=v,k=v` header form is split on its first `=` only, so values may
//! themselves contain `=`. Any malformed input yields an empty trace state,
//! never a partial one.

use tracing::warn;

use crate::host::TracingHost;
use crate::sdk::trace::{Context, SpanContext, SpanId, TraceFlags, TraceId, TraceState};
use crate::wire;

pub fn encode_flags(flags: TraceFlags) -> wire::tracing::TraceFlags {
    wire::tracing::TraceFlags {
        sampled: flags.0 & TraceFlags::SAMPLED.0 == TraceFlags::SAMPLED.0,
    }
}

pub fn decode_flags(flags: wire::tracing::TraceFlags) -> TraceFlags {
    if flags.sampled {
        TraceFlags::SAMPLED
    } else {
        TraceFlags::NONE
    }
}

/// Parses a `k=v,k=v` header. Malformed input yields an empty state.
pub fn parse_trace_state_header(header: &str) -> TraceState {
    match split_header(header) {
        Some(entries) => decode_trace_state(&entries),
        None => {
            warn!(header, "malformed trace state header, dropping it");
            TraceState::default()
        }
    }
}

pub fn encode_trace_state(state: &TraceState) -> wire::tracing::TraceState {
    split_header(&state.header()).unwrap_or_default()
}

pub fn decode_trace_state(entries: &[(String, String)]) -> TraceState {
    TraceState::from_key_value(entries.iter().cloned()).unwrap_or_else(|err| {
        warn!(error = %err, "invalid trace state, dropping it");
        TraceState::default()
    })
}

pub fn encode_span_context(context: &SpanContext) -> wire::tracing::SpanContext {
    wire::tracing::SpanContext {
        trace_id: context.trace_id.to_hex(),
        span_id: context.span_id.to_hex(),
        trace_flags: encode_flags(context.trace_flags),
        is_remote: context.is_remote,
        trace_state: encode_trace_state(&context.trace_state),
    }
}

/// Decodes a wire span context. Ids that are not full-width hex become the
/// invalid id.
pub fn decode_span_context(context: &wire::tracing::SpanContext) -> SpanContext {
    let trace_id = TraceId::from_hex(&context.trace_id).unwrap_or_else(|| {
        warn!(trace_id = %context.trace_id, "malformed trace id");
        TraceId::INVALID
    });
    let span_id = SpanId::from_hex(&context.span_id).unwrap_or_else(|| {
        warn!(span_id = %context.span_id, "malformed span id");
        SpanId::INVALID
    });
    SpanContext::new(
        trace_id,
        span_id,
        decode_flags(context.trace_flags),
        context.is_remote,
        decode_trace_state(&context.trace_state),
    )
}

/// Reads the host's active span context and makes it the remote parent in
/// a copy of `cx`.
pub fn extract_span_context<H>(host: &H, cx: &Context) -> Context
where
    H: TracingHost + ?Sized,
{
    let outer = host.outer_span_context();
    cx.with_remote_span_context(decode_span_context(&outer))
}

fn split_header(header: &str) -> Option<Vec<(String, String)>> {
    header
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
        })
        .collect()
}
