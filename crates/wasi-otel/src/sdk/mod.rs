//! In-process telemetry model.
//!
//! This is the shape the observability SDK hands to processor and reader
//! hooks. It is deliberately looser than the wire schema: attribute values
//! may be null or mixed-kind, numbers are untyped floats unless the SDK
//! knows better, and metric snapshots may carry aggregations the wire
//! schema cannot express.

pub mod logs;
pub mod metrics;
pub mod trace;
pub mod value;

pub use logs::{LogRecord, LogValue};
pub use metrics::{
    AggregationTemporality, CollectionResult, DataPoint, ExponentialHistogramValue,
    HistogramValue, InstrumentDescriptor, InstrumentType, MetricData, MetricPoints, MetricValue,
    ResourceMetrics, ScopeMetrics, ValueType,
};
pub use trace::{
    Context, Link, ReadableSpan, SpanContext, SpanId, SpanKind, SpanStatus, TimedEvent, TraceFlags,
    TraceId, TraceState, TraceStateError,
};
pub use value::{AttributeValue, HrTime, InstrumentationScope, KeyValue, Resource};
