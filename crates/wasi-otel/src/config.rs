//! Bridge configuration.
//!
//! Loaded from JSON or from the standard OpenTelemetry environment
//! variables. Every field has a default, so an empty source is valid.

use std::fmt;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{OtelError, OtelResult};
use crate::sdk::value::{KeyValue, Resource};
use crate::wire::metrics::Temporality;

pub const ENV_SERVICE_NAME: &str = "OTEL_SERVICE_NAME";
pub const ENV_RESOURCE_ATTRIBUTES: &str = "OTEL_RESOURCE_ATTRIBUTES";
pub const ENV_METRICS_TEMPORALITY: &str = "OTEL_EXPORTER_OTLP_METRICS_TEMPORALITY_PREFERENCE";
pub const ENV_SPAN_START: &str = "WASI_OTEL_SPAN_START";

/// Which host `on-start` variant the span processor calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanStartMode {
    /// `on-start(span-context)`.
    #[default]
    Context,
    /// `on-start(span-data, parent-span-context)`.
    SpanWithParent,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub span_start: SpanStartMode,
    pub metrics_temporality: Temporality,
    pub service_name: Option<String>,
    /// Attributes in the order they were given. Keys are unique; a repeated
    /// key keeps its first position and takes the last value.
    #[serde(with = "ordered_attributes")]
    pub resource_attributes: Vec<(String, String)>,
}

impl BridgeConfig {
    pub fn from_json(json: &str) -> OtelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the process environment.
    pub fn from_env() -> OtelResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from a variable lookup. Unset or blank variables keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> OtelResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();
        if let Some(name) = get(ENV_SERVICE_NAME) {
            config.service_name = Some(name);
        }
        if let Some(attrs) = get(ENV_RESOURCE_ATTRIBUTES) {
            config.resource_attributes = parse_resource_attributes(&attrs);
        }
        if let Some(value) = get(ENV_METRICS_TEMPORALITY) {
            config.metrics_temporality = parse_keyword(ENV_METRICS_TEMPORALITY, &value)?;
        }
        if let Some(value) = get(ENV_SPAN_START) {
            config.span_start = parse_keyword(ENV_SPAN_START, &value)?;
        }
        Ok(config)
    }

    /// Sets an attribute, keeping the position of an existing key.
    pub fn set_resource_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        insert_attribute(&mut self.resource_attributes, key.into(), value.into());
    }

    pub fn resource_attribute(&self, key: &str) -> Option<&str> {
        self.resource_attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The configured resource. `service.name` comes first when set, and
    /// overrides a `service.name` entry in the attribute map.
    pub fn resource(&self) -> Resource {
        let mut attributes = Vec::with_capacity(self.resource_attributes.len() + 1);
        if let Some(name) = &self.service_name {
            attributes.push(KeyValue::new("service.name", name.as_str()));
        }
        for (key, value) in &self.resource_attributes {
            if key == "service.name" && self.service_name.is_some() {
                continue;
            }
            attributes.push(KeyValue::new(key.as_str(), value.as_str()));
        }
        Resource::new(attributes)
    }
}

/// Parses `k=v,k=v`, splitting each entry on its first `=`. Entries without
/// `=` or with an empty key are skipped.
fn parse_resource_attributes(attrs: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in attrs.split(',').filter_map(|pair| pair.split_once('=')) {
        let key = key.trim();
        if !key.is_empty() {
            insert_attribute(&mut pairs, key.to_string(), value.trim().to_string());
        }
    }
    pairs
}

fn insert_attribute(pairs: &mut Vec<(String, String)>, key: String, value: String) {
    match pairs.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => pairs.push((key, value)),
    }
}

/// Ordered pairs as a JSON object, preserving entry order both ways.
mod ordered_attributes {
    use super::*;

    pub fn serialize<S>(pairs: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(pairs.len()))?;
        for (key, value) in pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = Vec<(String, String)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of string attributes")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    insert_attribute(&mut pairs, key, value);
                }
                Ok(pairs)
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

fn parse_keyword<T: DeserializeOwned>(variable: &str, value: &str) -> OtelResult<T> {
    serde_json::from_value(serde_json::Value::String(value.to_ascii_lowercase()))
        .map_err(|_| OtelError::Config(format!("{variable}: unrecognized value {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::value::AttributeValue;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::from_json("{}").unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.span_start, SpanStartMode::Context);
        assert_eq!(config.metrics_temporality, Temporality::Cumulative);
    }

    #[test]
    fn test_from_json() {
        let config = BridgeConfig::from_json(
            r#"{
                "span_start": "span-with-parent",
                "metrics_temporality": "delta",
                "service_name": "checkout",
                "resource_attributes": {"deployment.environment": "prod"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.span_start, SpanStartMode::SpanWithParent);
        assert_eq!(config.metrics_temporality, Temporality::Delta);
        assert_eq!(config.service_name.as_deref(), Some("checkout"));
    }

    #[test]
    fn test_from_json_rejects_unknown_mode() {
        let err = BridgeConfig::from_json(r#"{"span_start": "eager"}"#).unwrap_err();
        assert!(matches!(err, OtelError::Config(_)));
    }

    #[test]
    fn test_from_lookup() {
        let config = BridgeConfig::from_lookup(lookup(&[
            (ENV_SERVICE_NAME, "svc"),
            (ENV_RESOURCE_ATTRIBUTES, "team=core, region = eu-west=1 ,broken"),
            (ENV_METRICS_TEMPORALITY, "Delta"),
            (ENV_SPAN_START, " "),
        ]))
        .unwrap();
        assert_eq!(config.service_name.as_deref(), Some("svc"));
        assert_eq!(config.metrics_temporality, Temporality::Delta);
        assert_eq!(config.span_start, SpanStartMode::Context);
        assert_eq!(config.resource_attribute("team"), Some("core"));
        assert_eq!(config.resource_attribute("region"), Some("eu-west=1"));
        assert_eq!(config.resource_attributes.len(), 2);
    }

    #[test]
    fn test_from_lookup_rejects_unknown_keyword() {
        let err = BridgeConfig::from_lookup(lookup(&[(ENV_SPAN_START, "eager")])).unwrap_err();
        assert_eq!(
            err,
            OtelError::Config(format!("{ENV_SPAN_START}: unrecognized value \"eager\""))
        );
        assert!(BridgeConfig::from_lookup(lookup(&[(ENV_METRICS_TEMPORALITY, "low-memory")])).is_ok());
    }

    #[test]
    fn test_resource_attributes_keep_given_order() {
        let config = BridgeConfig::from_lookup(lookup(&[(
            ENV_RESOURCE_ATTRIBUTES,
            "zone=b,app=web,zone=c,cluster=k8s",
        )]))
        .unwrap();
        let keys: Vec<_> = config
            .resource()
            .attributes
            .iter()
            .map(|kv| kv.key.clone())
            .collect();
        assert_eq!(keys, ["zone", "app", "cluster"]);
        assert_eq!(config.resource_attribute("zone"), Some("c"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""resource_attributes":{"zone":"c","app":"web","cluster":"k8s"}"#));
        assert_eq!(BridgeConfig::from_json(&json).unwrap(), config);

        let config =
            BridgeConfig::from_json(r#"{"resource_attributes": {"z": "1", "a": "2"}}"#).unwrap();
        assert_eq!(
            config.resource_attributes,
            vec![("z".to_string(), "1".to_string()), ("a".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn test_resource_service_name_first() {
        let mut config = BridgeConfig {
            service_name: Some("svc".into()),
            ..Default::default()
        };
        config.set_resource_attribute("a", "1");
        config.set_resource_attribute("service.name", "other");

        let resource = config.resource();
        let keys: Vec<_> = resource.attributes.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(keys, ["service.name", "a"]);
        assert_eq!(resource.attributes[0].value, AttributeValue::from("svc"));
    }
}
