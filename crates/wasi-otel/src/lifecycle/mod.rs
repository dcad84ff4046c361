//! Lifecycle guards.
//!
//! Guards sit between the SDK's hook interfaces and the host. Each one
//! implements exactly the capabilities below that its SDK role needs, runs
//! the matching codec on every event, and forwards the result to a host
//! trait from [`crate::host`].
//!
//! After shutdown has fired, event hooks are silently ignored. Shutdown
//! itself runs its teardown once; see [`ShutdownOnce`].
//!
//! Event hooks are synchronous and never suspend. Flush, shutdown and
//! export are async because they may wait on the SDK.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::OtelResult;
use crate::sdk::logs::LogRecord;
use crate::sdk::trace::{Context, ReadableSpan};

pub mod log_processor;
pub mod metric_reader;
pub mod once;
pub mod propagator;
pub mod span_processor;

pub use log_processor::WasiLogProcessor;
pub use metric_reader::{MetricProducer, WasiMetricReader};
pub use once::ShutdownOnce;
pub use propagator::TraceContextPropagator;
pub use span_processor::WasiSpanProcessor;

/// Receives spans as they start.
pub trait OnStart {
    fn on_start(&self, span: &ReadableSpan, parent_cx: &Context);
}

/// Receives spans as they end.
pub trait OnEnd {
    fn on_end(&self, span: &ReadableSpan);
}

/// Receives emitted log records.
pub trait OnEmit {
    fn on_emit(&self, record: &LogRecord);
}

/// Builds a context from an inbound carrier.
pub trait Extract {
    fn extract(&self, cx: &Context) -> Context;
}

/// Carrier that propagated fields are written into.
pub trait Injector {
    fn set(&mut self, key: &str, value: String);
}

impl Injector for HashMap<String, String> {
    fn set(&mut self, key: &str, value: String) {
        self.insert(key.to_string(), value);
    }
}

/// Writes a context into an outbound carrier.
pub trait Inject {
    fn inject(&self, cx: &Context, carrier: &mut dyn Injector) -> OtelResult<()>;
}

#[async_trait]
pub trait ForceFlush {
    async fn force_flush(&self) -> OtelResult<()>;
}

#[async_trait]
pub trait Shutdown {
    /// Safe to call repeatedly and concurrently. Every caller observes the
    /// outcome of the single teardown.
    async fn shutdown(&self) -> OtelResult<()>;
}

/// Pushes collected data to the host.
#[async_trait]
pub trait Export {
    async fn export(&self) -> OtelResult<()>;
}

pub trait SpanProcessor: OnStart + OnEnd + ForceFlush + Shutdown {}

impl<T: OnStart + OnEnd + ForceFlush + Shutdown> SpanProcessor for T {}

pub trait LogProcessor: OnEmit + ForceFlush + Shutdown {}

impl<T: OnEmit + ForceFlush + Shutdown> LogProcessor for T {}

pub trait MetricReader: Export + ForceFlush + Shutdown {}

impl<T: Export + ForceFlush + Shutdown> MetricReader for T {}

pub trait TextMapPropagator: Extract + Inject {}

impl<T: Extract + Inject> TextMapPropagator for T {}
