//! Span processor that forwards span lifecycle events to the host.

use async_trait::async_trait;
use tracing::debug;

use super::{ForceFlush, OnEnd, OnStart, Shutdown, ShutdownOnce};
use crate::codec::{encode_span, encode_span_context};
use crate::config::{BridgeConfig, SpanStartMode};
use crate::error::OtelResult;
use crate::host::TracingHost;
use crate::sdk::trace::{Context, ReadableSpan, SpanContext};

/// Forwards span starts and ends to a [`TracingHost`].
///
/// The start mode picks one of the host's two `on-start` variants; a
/// processor never mixes them. There is nothing buffered, so flushing is a
/// no-op.
#[derive(Debug)]
pub struct WasiSpanProcessor<H> {
    host: H,
    start_mode: SpanStartMode,
    shutdown: ShutdownOnce,
}

impl<H: TracingHost> WasiSpanProcessor<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            start_mode: SpanStartMode::default(),
            shutdown: ShutdownOnce::new(),
        }
    }

    pub fn from_config(host: H, config: &BridgeConfig) -> Self {
        Self::new(host).with_start_mode(config.span_start)
    }

    pub fn with_start_mode(mut self, mode: SpanStartMode) -> Self {
        self.start_mode = mode;
        self
    }

    pub fn start_mode(&self) -> SpanStartMode {
        self.start_mode
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: TracingHost> OnStart for WasiSpanProcessor<H> {
    fn on_start(&self, span: &ReadableSpan, parent_cx: &Context) {
        if self.shutdown.is_shutdown() {
            return;
        }
        debug!(span = %span.name, mode = ?self.start_mode, "forwarding span start");
        match self.start_mode {
            SpanStartMode::Context => {
                self.host.on_start(&encode_span_context(&span.span_context));
            }
            SpanStartMode::SpanWithParent => {
                let invalid = SpanContext::INVALID;
                let parent = parent_cx.span_context().unwrap_or(&invalid);
                self.host
                    .on_start_with_parent(&encode_span(span), &encode_span_context(parent));
            }
        }
    }
}

impl<H: TracingHost> OnEnd for WasiSpanProcessor<H> {
    fn on_end(&self, span: &ReadableSpan) {
        if self.shutdown.is_shutdown() {
            return;
        }
        debug!(span = %span.name, "forwarding span end");
        self.host.on_end(&encode_span(span));
    }
}

#[async_trait]
impl<H: TracingHost> ForceFlush for WasiSpanProcessor<H> {
    async fn force_flush(&self) -> OtelResult<()> {
        Ok(())
    }
}

#[async_trait]
impl<H: TracingHost> Shutdown for WasiSpanProcessor<H> {
    async fn shutdown(&self) -> OtelResult<()> {
        self.shutdown.run(|| async { Ok(()) }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::trace::{SpanId, TraceFlags, TraceId, TraceState};
    use crate::testing::RecordingHost;
    use crate::wire;

    fn span(name: &str) -> ReadableSpan {
        ReadableSpan {
            name: name.into(),
            span_context: SpanContext::new(
                TraceId([3; 16]),
                SpanId([4; 8]),
                TraceFlags::SAMPLED,
                false,
                TraceState::default(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_context_mode_forwards_span_context() {
        let processor = WasiSpanProcessor::new(RecordingHost::new());
        processor.on_start(&span("a"), &Context::new());

        let started = processor.host().started();
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].span_id, "0404040404040404");
        assert!(started[0].trace_flags.sampled);
        assert!(processor.host().started_with_parent().is_empty());
    }

    #[test]
    fn test_span_with_parent_mode() {
        let processor = WasiSpanProcessor::new(RecordingHost::new())
            .with_start_mode(SpanStartMode::SpanWithParent);
        let parent = SpanContext::new(
            TraceId([3; 16]),
            SpanId([1; 8]),
            TraceFlags::SAMPLED,
            false,
            TraceState::default(),
        );
        let cx = Context::new().with_remote_span_context(parent);

        processor.on_start(&span("child"), &cx);
        processor.on_start(&span("root"), &Context::new());

        let started = processor.host().started_with_parent();
        assert_eq!(started.len(), 2);
        assert_eq!(started[0].0.name, "child");
        assert_eq!(started[0].1.span_id, "0101010101010101");
        assert!(started[0].1.is_remote);
        assert_eq!(started[1].1.trace_id, "0".repeat(32));
        assert!(processor.host().started().is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = BridgeConfig {
            span_start: SpanStartMode::SpanWithParent,
            ..Default::default()
        };
        let processor = WasiSpanProcessor::from_config(RecordingHost::new(), &config);
        assert_eq!(processor.start_mode(), SpanStartMode::SpanWithParent);
    }

    #[tokio::test]
    async fn test_hooks_ignored_after_shutdown() {
        let processor = WasiSpanProcessor::new(RecordingHost::new());
        processor.on_end(&span("before"));

        assert_eq!(processor.shutdown().await, Ok(()));
        assert_eq!(processor.shutdown().await, Ok(()));
        assert_eq!(processor.force_flush().await, Ok(()));

        processor.on_start(&span("after"), &Context::new());
        processor.on_end(&span("after"));

        let ended: Vec<wire::tracing::SpanData> = processor.host().ended();
        assert_eq!(ended.len(), 1);
        assert_eq!(ended[0].name, "before");
        assert!(processor.host().started().is_empty());
    }
}
