//! Log processor that forwards emitted records to the host.

use async_trait::async_trait;
use tracing::debug;

use super::{ForceFlush, OnEmit, Shutdown, ShutdownOnce};
use crate::codec::encode_log_record;
use crate::error::OtelResult;
use crate::host::LogsHost;
use crate::sdk::logs::LogRecord;
use crate::sdk::value::Resource;

#[derive(Debug)]
pub struct WasiLogProcessor<H> {
    host: H,
    resource: Option<Resource>,
    shutdown: ShutdownOnce,
}

impl<H: LogsHost> WasiLogProcessor<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            resource: None,
            shutdown: ShutdownOnce::new(),
        }
    }

    /// Every emitted record carries `resource` instead of its own.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: LogsHost> OnEmit for WasiLogProcessor<H> {
    fn on_emit(&self, record: &LogRecord) {
        if self.shutdown.is_shutdown() {
            return;
        }
        debug!(severity = ?record.severity_text, "forwarding log record");
        self.host
            .on_emit(&encode_log_record(record, self.resource.as_ref()));
    }
}

#[async_trait]
impl<H: LogsHost> ForceFlush for WasiLogProcessor<H> {
    async fn force_flush(&self) -> OtelResult<()> {
        Ok(())
    }
}

#[async_trait]
impl<H: LogsHost> Shutdown for WasiLogProcessor<H> {
    async fn shutdown(&self) -> OtelResult<()> {
        self.shutdown.run(|| async { Ok(()) }).await
    }
}
