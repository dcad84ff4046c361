//! The `wasi:otel/metrics` interface.

use serde::{Deserialize, Serialize};

use super::types::{Datetime, InstrumentationScope, KeyValue, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Temporality {
    #[default]
    Cumulative,
    Delta,
    LowMemory,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "val", rename_all = "kebab-case")]
pub enum MetricNumber {
    F64(f64),
    S64(i64),
    U64(u64),
}

/// A sampled raw measurement retained alongside an aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exemplar {
    pub filtered_attributes: Vec<KeyValue>,
    pub time: Datetime,
    pub value: MetricNumber,
    pub span_id: String,
    pub trace_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeDataPoint {
    pub attributes: Vec<KeyValue>,
    pub value: MetricNumber,
    pub exemplars: Vec<Exemplar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    pub data_points: Vec<GaugeDataPoint>,
    pub start_time: Option<Datetime>,
    pub time: Datetime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SumDataPoint {
    pub attributes: Vec<KeyValue>,
    pub value: MetricNumber,
    pub exemplars: Vec<Exemplar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sum {
    pub data_points: Vec<SumDataPoint>,
    pub start_time: Datetime,
    pub time: Datetime,
    pub temporality: Temporality,
    pub is_monotonic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramDataPoint {
    pub attributes: Vec<KeyValue>,
    pub count: u64,
    pub bounds: Vec<f64>,
    pub bucket_counts: Vec<u64>,
    pub min: Option<MetricNumber>,
    pub max: Option<MetricNumber>,
    pub sum: MetricNumber,
    pub exemplars: Vec<Exemplar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub data_points: Vec<HistogramDataPoint>,
    pub start_time: Datetime,
    pub time: Datetime,
    pub temporality: Temporality,
}

/// Populated buckets of one sign, starting at bucket index `offset`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExponentialBucket {
    pub offset: i32,
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExponentialHistogramDataPoint {
    pub attributes: Vec<KeyValue>,
    pub count: u64,
    pub min: Option<MetricNumber>,
    pub max: Option<MetricNumber>,
    pub sum: MetricNumber,
    pub scale: i8,
    pub zero_count: u64,
    pub positive_bucket: ExponentialBucket,
    pub negative_bucket: ExponentialBucket,
    pub zero_threshold: f64,
    pub exemplars: Vec<Exemplar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExponentialHistogram {
    pub data_points: Vec<ExponentialHistogramDataPoint>,
    pub start_time: Datetime,
    pub time: Datetime,
    pub temporality: Temporality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "val", rename_all = "kebab-case")]
pub enum MetricData {
    Gauge(Gauge),
    Sum(Sum),
    Histogram(Histogram),
    ExponentialHistogram(ExponentialHistogram),
}

/// Aggregated data tagged with the numeric kind shared by all its points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "val", rename_all = "kebab-case")]
pub enum AggregatedMetrics {
    F64(MetricData),
    U64(MetricData),
    S64(MetricData),
}

impl AggregatedMetrics {
    pub fn data(&self) -> &MetricData {
        match self {
            AggregatedMetrics::F64(d) | AggregatedMetrics::U64(d) | AggregatedMetrics::S64(d) => d,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub data: AggregatedMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeMetrics {
    pub scope: InstrumentationScope,
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceMetrics {
    pub resource: Resource,
    pub scope_metrics: Vec<ScopeMetrics>,
}

/// Error a host may report from `export`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "val", rename_all = "kebab-case")]
pub enum OtelError {
    AlreadyShutdown,
    /// Elapsed time in nanoseconds.
    Timeout(u64),
    InternalFailure(String),
}
