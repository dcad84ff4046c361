//! Recording host for unit tests.

use std::sync::Mutex;

use crate::host::{LogsHost, MetricsHost, TracingHost};
use crate::wire::logs::LogRecord;
use crate::wire::metrics::{OtelError, ResourceMetrics};
use crate::wire::tracing::{SpanContext, SpanData};

/// Implements every host trait and records what it receives.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    outer: SpanContext,
    export_error: Option<OtelError>,
    started: Mutex<Vec<SpanContext>>,
    started_with_parent: Mutex<Vec<(SpanData, SpanContext)>>,
    ended: Mutex<Vec<SpanData>>,
    exported: Mutex<Vec<ResourceMetrics>>,
    emitted: Mutex<Vec<LogRecord>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outer(outer: SpanContext) -> Self {
        Self {
            outer,
            ..Self::default()
        }
    }

    pub fn failing_export(err: OtelError) -> Self {
        Self {
            export_error: Some(err),
            ..Self::default()
        }
    }

    pub fn started(&self) -> Vec<SpanContext> {
        self.started.lock().unwrap().clone()
    }

    pub fn started_with_parent(&self) -> Vec<(SpanData, SpanContext)> {
        self.started_with_parent.lock().unwrap().clone()
    }

    pub fn ended(&self) -> Vec<SpanData> {
        self.ended.lock().unwrap().clone()
    }

    pub fn exported(&self) -> Vec<ResourceMetrics> {
        self.exported.lock().unwrap().clone()
    }

    pub fn emitted(&self) -> Vec<LogRecord> {
        self.emitted.lock().unwrap().clone()
    }
}

impl TracingHost for RecordingHost {
    fn on_start(&self, context: &SpanContext) {
        self.started.lock().unwrap().push(context.clone());
    }

    fn on_start_with_parent(&self, span: &SpanData, parent: &SpanContext) {
        self.started_with_parent
            .lock()
            .unwrap()
            .push((span.clone(), parent.clone()));
    }

    fn on_end(&self, span: &SpanData) {
        self.ended.lock().unwrap().push(span.clone());
    }

    fn outer_span_context(&self) -> SpanContext {
        self.outer.clone()
    }
}

impl MetricsHost for RecordingHost {
    fn export(&self, metrics: &ResourceMetrics) -> Result<(), OtelError> {
        if let Some(err) = &self.export_error {
            return Err(err.clone());
        }
        self.exported.lock().unwrap().push(metrics.clone());
        Ok(())
    }
}

impl LogsHost for RecordingHost {
    fn on_emit(&self, record: &LogRecord) {
        self.emitted.lock().unwrap().push(record.clone());
    }
}
