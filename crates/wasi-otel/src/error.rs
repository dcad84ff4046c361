//! Error types for the bridge.
//!
//! Errors are structured so the lifecycle guards can hand one shared outcome
//! to every caller (`OtelError` is `Clone`), and so the host's wire-level
//! error variant converts cleanly in both directions.
//!
//! # Error Hierarchy
//!
//! - `serde_json::Error` → `OtelError::Config`
//! - `wire::metrics::OtelError` ↔ `OtelError`

use std::time::Duration;

use thiserror::Error;

use crate::wire::metrics::OtelError as WireOtelError;

/// Result alias used throughout the crate.
pub type OtelResult<T> = Result<T, OtelError>;

/// Failures surfaced by the codecs and lifecycle guards.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OtelError {
    /// The guard (or the host behind it) has already been shut down.
    #[error("already shut down")]
    AlreadyShutdown,

    /// An operation did not complete within the allotted time.
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),

    /// The host or the SDK reported a failure it could not recover from.
    #[error("internal failure: {0}")]
    InternalFailure(String),

    /// The capability exists in the hook interface but this guard does not
    /// provide it.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// A metric snapshot carried an aggregation the wire schema cannot
    /// express. Fatal for the export pass that hit it.
    #[error("unsupported metric aggregation: {0}")]
    UnsupportedAggregation(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for OtelError {
    fn from(err: serde_json::Error) -> Self {
        OtelError::Config(err.to_string())
    }
}

/// Converts the host's wire error into the crate error.
impl From<WireOtelError> for OtelError {
    fn from(err: WireOtelError) -> Self {
        match err {
            WireOtelError::AlreadyShutdown => OtelError::AlreadyShutdown,
            WireOtelError::Timeout(nanos) => OtelError::Timeout(Duration::from_nanos(nanos)),
            WireOtelError::InternalFailure(msg) => OtelError::InternalFailure(msg),
        }
    }
}

/// Converts the crate error into the wire variant. Variants the wire schema
/// has no slot for travel as `internal-failure` with their message.
impl From<OtelError> for WireOtelError {
    fn from(err: OtelError) -> Self {
        match err {
            OtelError::AlreadyShutdown => WireOtelError::AlreadyShutdown,
            OtelError::Timeout(d) => {
                WireOtelError::Timeout(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            }
            OtelError::InternalFailure(msg) => WireOtelError::InternalFailure(msg),
            other => WireOtelError::InternalFailure(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(OtelError::AlreadyShutdown.to_string(), "already shut down");
        assert_eq!(
            OtelError::NotImplemented("pull").to_string(),
            "pull is not implemented"
        );
        assert_eq!(
            OtelError::UnsupportedAggregation("summary".to_string()).to_string(),
            "unsupported metric aggregation: summary"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let err = OtelError::from(json_err);
        assert!(matches!(err, OtelError::Config(_)));
    }

    #[test]
    fn test_wire_error_conversion() {
        let err: OtelError = WireOtelError::Timeout(1_500).into();
        assert_eq!(err, OtelError::Timeout(Duration::from_nanos(1_500)));

        let err: OtelError = WireOtelError::InternalFailure("boom".to_string()).into();
        assert_eq!(err, OtelError::InternalFailure("boom".to_string()));

        let wire: WireOtelError = OtelError::AlreadyShutdown.into();
        assert_eq!(wire, WireOtelError::AlreadyShutdown);

        let wire: WireOtelError = OtelError::NotImplemented("pull").into();
        assert_eq!(
            wire,
            WireOtelError::InternalFailure("pull is not implemented".to_string())
        );
    }
}
