//! Bridge between an in-process OpenTelemetry model and the `wasi:otel`
//! component interfaces.
//!
//! A guest component records telemetry with an SDK; the host receives it
//! through the `wasi:otel` imports. This crate sits in between: it
//! translates spans, metric snapshots, log records and trace context into
//! the closed tagged-variant wire schema, and wraps that translation in the
//! processor, reader and propagator hooks the SDK calls.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  SDK (spans, metrics, logs, context)         │
//! ├──────────────────────────────────────────────┤
//! │  lifecycle                                   │
//! │    ├─→ WasiSpanProcessor   on_start/on_end   │
//! │    ├─→ WasiMetricReader    export            │
//! │    ├─→ WasiLogProcessor    on_emit           │
//! │    └─→ TraceContextPropagator extract        │
//! │  codec                                       │
//! │    value, context, span, metrics, logs       │
//! ├──────────────────────────────────────────────┤
//! │  host traits  ──→  wasi:otel imports         │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Data flows outbound except for context extraction, which reads the
//! host's active span context and makes it the remote parent of new spans.
//!
//! # Behaviour worth knowing
//!
//! - Attribute numbers are typed by value: an integral float encodes as
//!   `s64`. See [`codec::value`].
//! - Malformed trace state degrades to an empty trace state.
//! - Metric numeric kind is chosen per instrument, not per point.
//! - A summary aggregation fails the whole metric export.
//! - Log bodies are JSON strings; bytes become base64 data URIs.
//! - After shutdown, event hooks are ignored. Shutdown runs its teardown
//!   once, however many callers race on it.
//! - Log records never carry trace correlation ids.
//!
//! # Boundary
//!
//! No bindings are generated here. Implement [`host::TracingHost`],
//! [`host::MetricsHost`] and [`host::LogsHost`] over your component's
//! imports and hand them to the guards.

pub mod codec;
pub mod config;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod logging;
pub mod sdk;
pub mod wire;

#[cfg(test)]
mod testing;

pub use config::{BridgeConfig, SpanStartMode};
pub use error::{OtelError, OtelResult};
pub use host::{LogsHost, MetricsHost, TracingHost};
pub use lifecycle::{
    Export, Extract, ForceFlush, Inject, LogProcessor, MetricProducer, MetricReader, OnEmit,
    OnEnd, OnStart, Shutdown, ShutdownOnce, SpanProcessor, TextMapPropagator,
    TraceContextPropagator, WasiLogProcessor, WasiMetricReader, WasiSpanProcessor,
};
pub use logging::init_diagnostics;
