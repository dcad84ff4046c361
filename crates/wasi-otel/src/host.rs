//! The host boundary.
//!
//! Each trait mirrors the functions one `wasi:otel` interface imports into
//! the guest. An embedder implements them on top of its generated bindings;
//! the lifecycle guards only ever talk to these traits.
//!
//! All calls are synchronous. The host owns transport, buffering and
//! backpressure; from the guest's side every call is fire-and-forget except
//! metric export, which reports failure.

use std::sync::Arc;

use crate::wire::logs::LogRecord;
use crate::wire::metrics::{OtelError, ResourceMetrics};
use crate::wire::tracing::{SpanContext, SpanData};

/// Functions imported from `wasi:otel/tracing`.
pub trait TracingHost: Send + Sync {
    /// Called when a span starts, with the new span's context.
    fn on_start(&self, context: &SpanContext);

    /// Called when a span starts, with the full span and its parent context.
    ///
    /// Hosts that only import the context-only variant can leave the
    /// default, which forwards the span's own context to [`on_start`].
    ///
    /// [`on_start`]: TracingHost::on_start
    fn on_start_with_parent(&self, span: &SpanData, _parent: &SpanContext) {
        self.on_start(&span.span_context);
    }

    /// Called when a span ends.
    fn on_end(&self, span: &SpanData);

    /// The host's currently active span context.
    fn outer_span_context(&self) -> SpanContext;
}

/// Functions imported from `wasi:otel/metrics`.
pub trait MetricsHost: Send + Sync {
    fn export(&self, metrics: &ResourceMetrics) -> Result<(), OtelError>;
}

/// Functions imported from `wasi:otel/logs`.
pub trait LogsHost: Send + Sync {
    fn on_emit(&self, record: &LogRecord);
}

impl<T: TracingHost + ?Sized> TracingHost for Arc<T> {
    fn on_start(&self, context: &SpanContext) {
        (**self).on_start(context)
    }

    fn on_start_with_parent(&self, span: &SpanData, parent: &SpanContext) {
        (**self).on_start_with_parent(span, parent)
    }

    fn on_end(&self, span: &SpanData) {
        (**self).on_end(span)
    }

    fn outer_span_context(&self) -> SpanContext {
        (**self).outer_span_context()
    }
}

impl<T: MetricsHost + ?Sized> MetricsHost for Arc<T> {
    fn export(&self, metrics: &ResourceMetrics) -> Result<(), OtelError> {
        (**self).export(metrics)
    }
}

impl<T: LogsHost + ?Sized> LogsHost for Arc<T> {
    fn on_emit(&self, record: &LogRecord) {
        (**self).on_emit(record)
    }
}
