//! The `wasi:otel` wire schema.
//!
//! These are the value objects that cross the component boundary. Each
//! submodule mirrors one interface of the `wasi:otel` package. Variants
//! serialize as `{"tag": ..., "val": ...}` so a JSON rendering matches the
//! canonical-ABI shape hosts see.

pub mod logs;
pub mod metrics;
pub mod tracing;
pub mod types;

pub use types::{Datetime, InstrumentationScope, KeyValue, Resource, Value};
