//! Metric reader that pushes collected snapshots to the host.

use async_trait::async_trait;
use tracing::{debug, error};

use super::{Export, ForceFlush, Shutdown, ShutdownOnce};
use crate::codec::encode_resource_metrics;
use crate::config::BridgeConfig;
use crate::error::{OtelError, OtelResult};
use crate::host::MetricsHost;
use crate::sdk::metrics::{CollectionResult, InstrumentType};
use crate::wire::metrics::{ResourceMetrics, Temporality};

/// The SDK side of a metric pipeline: something that can produce the
/// current aggregation snapshot.
#[async_trait]
pub trait MetricProducer: Send + Sync {
    async fn collect(&self) -> CollectionResult;

    async fn force_flush(&self) -> OtelResult<()> {
        Ok(())
    }

    async fn shutdown(&self) -> OtelResult<()> {
        Ok(())
    }
}

/// Collects from a [`MetricProducer`] and exports to a [`MetricsHost`].
///
/// Export is push-only. Collection errors are logged and the partial
/// snapshot is still exported; an aggregation the wire schema cannot carry
/// fails the whole pass.
#[derive(Debug)]
pub struct WasiMetricReader<P, H> {
    producer: P,
    host: H,
    temporality: Temporality,
    shutdown: ShutdownOnce,
}

impl<P: MetricProducer, H: MetricsHost> WasiMetricReader<P, H> {
    pub fn new(producer: P, host: H) -> Self {
        Self {
            producer,
            host,
            temporality: Temporality::Cumulative,
            shutdown: ShutdownOnce::new(),
        }
    }

    pub fn from_config(producer: P, host: H, config: &BridgeConfig) -> Self {
        Self::new(producer, host).with_temporality(config.metrics_temporality)
    }

    pub fn with_temporality(mut self, temporality: Temporality) -> Self {
        self.temporality = temporality;
        self
    }

    /// Temporality the SDK should aggregate `kind` with.
    pub fn temporality(&self, kind: InstrumentType) -> Temporality {
        use InstrumentType::*;
        match (self.temporality, kind) {
            (Temporality::Cumulative, _) => Temporality::Cumulative,
            (Temporality::Delta, Counter | Histogram | ObservableCounter) => Temporality::Delta,
            (Temporality::LowMemory, Counter | Histogram) => Temporality::Delta,
            _ => Temporality::Cumulative,
        }
    }

    /// Host-initiated retrieval. Not supported; export is push-only.
    pub fn pull(&self) -> OtelResult<ResourceMetrics> {
        Err(OtelError::NotImplemented("pull"))
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

#[async_trait]
impl<P: MetricProducer, H: MetricsHost> Export for WasiMetricReader<P, H> {
    async fn export(&self) -> OtelResult<()> {
        if self.shutdown.is_shutdown() {
            debug!("metric reader is shut down, skipping export");
            return Ok(());
        }

        let CollectionResult {
            resource_metrics,
            errors,
        } = self.producer.collect().await;
        if !errors.is_empty() {
            error!(?errors, "metrics collection errors");
        }

        let metrics = encode_resource_metrics(&resource_metrics)?;
        debug!(scopes = metrics.scope_metrics.len(), "exporting metrics");
        self.host.export(&metrics).map_err(OtelError::from)
    }
}

#[async_trait]
impl<P: MetricProducer, H: MetricsHost> ForceFlush for WasiMetricReader<P, H> {
    async fn force_flush(&self) -> OtelResult<()> {
        if self.shutdown.is_shutdown() {
            return Ok(());
        }
        self.producer.force_flush().await
    }
}

#[async_trait]
impl<P: MetricProducer, H: MetricsHost> Shutdown for WasiMetricReader<P, H> {
    async fn shutdown(&self) -> OtelResult<()> {
        self.shutdown.run(|| self.producer.shutdown()).await
    }
}
