//! Propagator that takes its parent context from the host.

use tracing::debug;

use super::{Extract, Inject, Injector};
use crate::codec::extract_span_context;
use crate::error::{OtelError, OtelResult};
use crate::host::TracingHost;
use crate::sdk::trace::Context;

/// Extracts the host's active span context as a remote parent.
///
/// Injection is not supported: the host owns outbound propagation.
#[derive(Debug)]
pub struct TraceContextPropagator<H> {
    host: H,
}

impl<H: TracingHost> TraceContextPropagator<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }
}

impl<H: TracingHost> Extract for TraceContextPropagator<H> {
    fn extract(&self, cx: &Context) -> Context {
        let extracted = extract_span_context(&self.host, cx);
        if let Some(parent) = extracted.span_context() {
            debug!(trace_id = %parent.trace_id, span_id = %parent.span_id, "extracted host span context");
        }
        extracted
    }
}

impl<H: TracingHost> Inject for TraceContextPropagator<H> {
    fn inject(&self, _cx: &Context, _carrier: &mut dyn Injector) -> OtelResult<()> {
        Err(OtelError::NotImplemented("inject"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHost;
    use crate::wire;
    use std::collections::HashMap;

    #[test]
    fn test_extract() {
        let host = RecordingHost::with_outer(wire::tracing::SpanContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".into(),
            span_id: "00f067aa0ba902b7".into(),
            trace_flags: wire::tracing::TraceFlags::SAMPLED,
            is_remote: false,
            trace_state: vec![("rojo".into(), "00f067aa0ba902b7".into())],
        });
        let propagator = TraceContextPropagator::new(host);

        let cx = propagator.extract(&Context::new());
        let parent = cx.span_context().unwrap();
        assert_eq!(parent.trace_id.to_hex(), "4bf92f3577b34da6a3ce929d0e0e4736");
        assert!(parent.is_remote);
        assert_eq!(parent.trace_state.get("rojo"), Some("00f067aa0ba902b7"));
    }

    #[test]
    fn test_inject_not_implemented() {
        let propagator = TraceContextPropagator::new(RecordingHost::new());
        let mut carrier: HashMap<String, String> = HashMap::new();
        assert_eq!(
            propagator.inject(&Context::new(), &mut carrier),
            Err(OtelError::NotImplemented("inject"))
        );
        assert!(carrier.is_empty());
    }
}
