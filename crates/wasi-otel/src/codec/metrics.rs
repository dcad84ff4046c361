//! Metric codec.
//!
//! The numeric kind of a metric (`f64`, `s64` or `u64`) is decided once from
//! the instrument's declared value type and applied to every data point.
//! A value recorded in that same type passes through unchanged. Any other
//! value is cast, not validated: a fractional value on an integer
//! instrument is truncated and out-of-range integers saturate.
//!
//! The wire metric carries one time range, taken from the first data point.
//! A metric without data points still encodes, using [`Datetime::ZERO`].

use tracing::warn;

use super::span::{encode_scope, encode_time};
use super::value::{encode_key_values, encode_resource};
use crate::error::{OtelError, OtelResult};
use crate::sdk::metrics::{
    AggregationTemporality, DataPoint, ExponentialBuckets, ExponentialHistogramValue,
    HistogramValue, MetricData, MetricPoints, MetricValue, ResourceMetrics, ScopeMetrics,
    ValueType,
};
use crate::wire::metrics as wm;
use crate::wire::Datetime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    F64,
    S64,
    U64,
}

impl NumberKind {
    fn of(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Double => NumberKind::F64,
            ValueType::Int => NumberKind::S64,
            ValueType::UnsignedInt => NumberKind::U64,
        }
    }

    fn number(self, value: MetricValue) -> wm::MetricNumber {
        use MetricValue as V;
        match (self, value) {
            (NumberKind::F64, V::F64(v)) => wm::MetricNumber::F64(v),
            (NumberKind::F64, V::I64(v)) => wm::MetricNumber::F64(v as f64),
            (NumberKind::F64, V::U64(v)) => wm::MetricNumber::F64(v as f64),
            (NumberKind::S64, V::I64(v)) => wm::MetricNumber::S64(v),
            (NumberKind::S64, V::F64(v)) => wm::MetricNumber::S64(v as i64),
            (NumberKind::S64, V::U64(v)) => {
                wm::MetricNumber::S64(i64::try_from(v).unwrap_or(i64::MAX))
            }
            (NumberKind::U64, V::U64(v)) => wm::MetricNumber::U64(v),
            (NumberKind::U64, V::F64(v)) => wm::MetricNumber::U64(v as u64),
            (NumberKind::U64, V::I64(v)) => wm::MetricNumber::U64(u64::try_from(v).unwrap_or(0)),
        }
    }

    fn wrap(self, data: wm::MetricData) -> wm::AggregatedMetrics {
        match self {
            NumberKind::F64 => wm::AggregatedMetrics::F64(data),
            NumberKind::S64 => wm::AggregatedMetrics::S64(data),
            NumberKind::U64 => wm::AggregatedMetrics::U64(data),
        }
    }
}

/// `0` is delta. Every other code maps to cumulative; codes other than
/// `1` are logged.
pub fn encode_temporality(temporality: AggregationTemporality) -> wm::Temporality {
    match temporality {
        AggregationTemporality::DELTA => wm::Temporality::Delta,
        AggregationTemporality::CUMULATIVE => wm::Temporality::Cumulative,
        AggregationTemporality(code) => {
            warn!(code, "unrecognized aggregation temporality, using cumulative");
            wm::Temporality::Cumulative
        }
    }
}

/// Encodes one metric. Fails for aggregations with no wire form.
pub fn encode_metric(metric: &MetricData) -> OtelResult<wm::Metric> {
    let kind = NumberKind::of(metric.descriptor.value_type);
    let temporality = encode_temporality(metric.aggregation_temporality);
    let range = metric
        .points
        .first_time_range()
        .map(|(start, end)| (encode_time(start), encode_time(end)));
    let (start_time, time) = range.unwrap_or((Datetime::ZERO, Datetime::ZERO));

    let data = match &metric.points {
        MetricPoints::Sum {
            is_monotonic,
            data_points,
        } => wm::MetricData::Sum(wm::Sum {
            data_points: data_points
                .iter()
                .map(|p| wm::SumDataPoint {
                    attributes: encode_key_values(&p.attributes),
                    value: kind.number(p.value),
                    exemplars: Vec::new(),
                })
                .collect(),
            start_time,
            time,
            temporality,
            is_monotonic: *is_monotonic,
        }),
        MetricPoints::Gauge(points) => wm::MetricData::Gauge(wm::Gauge {
            data_points: points
                .iter()
                .map(|p| wm::GaugeDataPoint {
                    attributes: encode_key_values(&p.attributes),
                    value: kind.number(p.value),
                    exemplars: Vec::new(),
                })
                .collect(),
            start_time: range.map(|(start, _)| start),
            time,
        }),
        MetricPoints::Histogram(points) => wm::MetricData::Histogram(wm::Histogram {
            data_points: points.iter().map(|p| encode_histogram_point(kind, p)).collect(),
            start_time,
            time,
            temporality,
        }),
        MetricPoints::ExponentialHistogram(points) => {
            wm::MetricData::ExponentialHistogram(wm::ExponentialHistogram {
                data_points: points
                    .iter()
                    .map(|p| encode_exponential_point(kind, p))
                    .collect(),
                start_time,
                time,
                temporality,
            })
        }
        other @ MetricPoints::Summary(_) => {
            return Err(OtelError::UnsupportedAggregation(other.kind_name().to_string()));
        }
    };

    Ok(wm::Metric {
        name: metric.descriptor.name.clone(),
        description: metric.descriptor.description.clone(),
        unit: metric.descriptor.unit.clone(),
        data: kind.wrap(data),
    })
}

/// Encodes a full collection snapshot. The first unsupported aggregation
/// fails the whole pass.
pub fn encode_resource_metrics(metrics: &ResourceMetrics) -> OtelResult<wm::ResourceMetrics> {
    Ok(wm::ResourceMetrics {
        resource: encode_resource(&metrics.resource),
        scope_metrics: metrics
            .scope_metrics
            .iter()
            .map(encode_scope_metrics)
            .collect::<OtelResult<_>>()?,
    })
}

fn encode_scope_metrics(scope: &ScopeMetrics) -> OtelResult<wm::ScopeMetrics> {
    Ok(wm::ScopeMetrics {
        scope: encode_scope(&scope.scope),
        metrics: scope
            .metrics
            .iter()
            .map(encode_metric)
            .collect::<OtelResult<_>>()?,
    })
}

fn encode_histogram_point(
    kind: NumberKind,
    point: &DataPoint<HistogramValue>,
) -> wm::HistogramDataPoint {
    let value = &point.value;
    wm::HistogramDataPoint {
        attributes: encode_key_values(&point.attributes),
        count: value.count,
        bounds: value.buckets.boundaries.clone(),
        bucket_counts: value.buckets.counts.clone(),
        min: value.min.map(|v| kind.number(v)),
        max: value.max.map(|v| kind.number(v)),
        sum: kind.number(value.sum.unwrap_or_default()),
        exemplars: Vec::new(),
    }
}

fn encode_exponential_point(
    kind: NumberKind,
    point: &DataPoint<ExponentialHistogramValue>,
) -> wm::ExponentialHistogramDataPoint {
    let value = &point.value;
    wm::ExponentialHistogramDataPoint {
        attributes: encode_key_values(&point.attributes),
        count: value.count,
        min: value.min.map(|v| kind.number(v)),
        max: value.max.map(|v| kind.number(v)),
        sum: kind.number(value.sum.unwrap_or_default()),
        scale: value.scale,
        zero_count: value.zero_count,
        positive_bucket: encode_bucket(&value.positive),
        negative_bucket: encode_bucket(&value.negative),
        zero_threshold: 0.0,
        exemplars: Vec::new(),
    }
}

fn encode_bucket(buckets: &ExponentialBuckets) -> wm::ExponentialBucket {
    wm::ExponentialBucket {
        offset: buckets.offset,
        counts: buckets.bucket_counts.clone(),
    }
}
