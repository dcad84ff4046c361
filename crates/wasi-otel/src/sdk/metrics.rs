//! Metric snapshots as produced by a collection pass.

use super::value::{HrTime, InstrumentationScope, KeyValue, Resource};

/// Numeric type an instrument was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    Int,
    UnsignedInt,
    #[default]
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentType {
    Counter,
    UpDownCounter,
    Histogram,
    Gauge,
    ObservableCounter,
    ObservableUpDownCounter,
    ObservableGauge,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstrumentDescriptor {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub instrument_type: Option<InstrumentType>,
    pub value_type: ValueType,
}

/// Raw temporality code from the SDK. Only `DELTA` and `CUMULATIVE` are
/// defined; other codes can appear when SDK and bridge disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AggregationTemporality(pub i32);

impl AggregationTemporality {
    pub const DELTA: AggregationTemporality = AggregationTemporality(0);
    pub const CUMULATIVE: AggregationTemporality = AggregationTemporality(1);
}

impl Default for AggregationTemporality {
    fn default() -> Self {
        Self::CUMULATIVE
    }
}

/// A measured value in the type the instrument recorded it with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    F64(f64),
    I64(i64),
    U64(u64),
}

impl Default for MetricValue {
    fn default() -> Self {
        MetricValue::F64(0.0)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::F64(v)
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::I64(v)
    }
}

impl From<u64> for MetricValue {
    fn from(v: u64) -> Self {
        MetricValue::U64(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint<T> {
    pub start_time: HrTime,
    pub end_time: HrTime,
    pub attributes: Vec<KeyValue>,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Buckets {
    pub boundaries: Vec<f64>,
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistogramValue {
    pub buckets: Buckets,
    pub sum: Option<MetricValue>,
    pub count: u64,
    pub min: Option<MetricValue>,
    pub max: Option<MetricValue>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExponentialBuckets {
    pub offset: i32,
    pub bucket_counts: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExponentialHistogramValue {
    pub count: u64,
    pub sum: Option<MetricValue>,
    pub scale: i8,
    pub zero_count: u64,
    pub positive: ExponentialBuckets,
    pub negative: ExponentialBuckets,
    pub min: Option<MetricValue>,
    pub max: Option<MetricValue>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryValue {
    pub count: u64,
    pub sum: f64,
    pub quantiles: Vec<(f64, f64)>,
}

/// Data points grouped by aggregation kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricPoints {
    Sum {
        is_monotonic: bool,
        data_points: Vec<DataPoint<MetricValue>>,
    },
    Gauge(Vec<DataPoint<MetricValue>>),
    Histogram(Vec<DataPoint<HistogramValue>>),
    ExponentialHistogram(Vec<DataPoint<ExponentialHistogramValue>>),
    Summary(Vec<DataPoint<SummaryValue>>),
}

impl MetricPoints {
    pub fn kind_name(&self) -> &'static str {
        match self {
            MetricPoints::Sum { .. } => "sum",
            MetricPoints::Gauge(_) => "gauge",
            MetricPoints::Histogram(_) => "histogram",
            MetricPoints::ExponentialHistogram(_) => "exponential-histogram",
            MetricPoints::Summary(_) => "summary",
        }
    }

    /// Time range of the first data point, if any.
    pub fn first_time_range(&self) -> Option<(HrTime, HrTime)> {
        fn first<T>(points: &[DataPoint<T>]) -> Option<(HrTime, HrTime)> {
            points.first().map(|p| (p.start_time, p.end_time))
        }
        match self {
            MetricPoints::Sum { data_points, .. } => first(data_points),
            MetricPoints::Gauge(points) => first(points),
            MetricPoints::Histogram(points) => first(points),
            MetricPoints::ExponentialHistogram(points) => first(points),
            MetricPoints::Summary(points) => first(points),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricData {
    pub descriptor: InstrumentDescriptor,
    pub aggregation_temporality: AggregationTemporality,
    pub points: MetricPoints,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScopeMetrics {
    pub scope: InstrumentationScope,
    pub metrics: Vec<MetricData>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceMetrics {
    pub resource: Resource,
    pub scope_metrics: Vec<ScopeMetrics>,
}

/// Output of one collection pass. Errors are non-fatal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionResult {
    pub resource_metrics: ResourceMetrics,
    pub errors: Vec<String>,
}
