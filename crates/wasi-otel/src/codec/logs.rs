//! Log record codec.

use super::log_value::serialize_log_value;
use super::span::{encode_scope, encode_time};
use crate::sdk::logs::{LogRecord, LogValue};
use crate::sdk::value::Resource;
use crate::wire::logs as wl;

/// Encodes a log record. `resource`, when given, replaces the record's own.
///
/// Trace correlation fields are always left empty.
pub fn encode_log_record(record: &LogRecord, resource: Option<&Resource>) -> wl::LogRecord {
    wl::LogRecord {
        timestamp: record.hr_time.map(encode_time),
        observed_timestamp: record.hr_time_observed.map(encode_time),
        severity_text: record.severity_text.clone(),
        severity_number: record.severity_number,
        body: record.body.as_ref().map(serialize_log_value),
        attributes: Some(encode_attributes(&record.attributes)),
        event_name: record.event_name.clone(),
        resource: resource.or(record.resource.as_ref()).map(encode_resource),
        instrumentation_scope: record.instrumentation_scope.as_ref().map(encode_scope),
        trace_id: None,
        span_id: None,
        trace_flags: None,
    }
}

fn encode_attributes(attributes: &[(String, LogValue)]) -> Vec<wl::KeyValue> {
    attributes
        .iter()
        .map(|(key, value)| wl::KeyValue {
            key: key.clone(),
            value: serialize_log_value(value),
        })
        .collect()
}

fn encode_resource(resource: &Resource) -> wl::Resource {
    wl::Resource {
        attributes: resource
            .attributes
            .iter()
            .map(|kv| wl::KeyValue {
                key: kv.key.clone(),
                value: serialize_log_value(&LogValue::from(&kv.value)),
            })
            .collect(),
        schema_url: resource.schema_url.clone(),
    }
}
