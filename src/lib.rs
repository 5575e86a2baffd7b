//! # JTI - Juniper Telemetry Interface normalization
//!
//! Turns decoded Juniper JTI streaming-telemetry messages into flat,
//! timestamped metric records a generic event pipeline can store.
//!
//! ## Key Features
//!
//! - **Schema-driven**: the eight supported sensor types are described as
//!   static data and walked by one shared traversal
//! - **Branch-safe tags**: every fanned-out record owns its tag list
//! - **Failure isolation**: a malformed entry costs only its own records
//! - **Pluggable edges**: decoding, clock conversion, record encoding,
//!   delivery and diagnostics are traits or function pointers
//!
//! ## Quick Start
//!
//! ```rust
//! use jti::{Normalizer, TelemetryEnvelope};
//! use serde_json::json;
//!
//! let envelope = TelemetryEnvelope::new(
//!     "mx960-1",
//!     1465467390,
//!     json!({
//!         "jnpr_sr_stats_per_if_ingress_ext": {
//!             "per_if_records": [
//!                 {"if_name": "ge-0/0/0", "ingress_stats": {"packets": 10, "bytes": 200}}
//!             ]
//!         }
//!     }),
//! );
//!
//! let report = Normalizer::default().normalize(&envelope);
//! assert_eq!(report.metrics.len(), 2);
//! assert_eq!(report.metrics[0].metric_type(), Some("ingress_stats.if_pkts"));
//! ```
//!
//! ## Modules
//!
//! - [`document`]: Typed view over decoded sensor payloads
//! - [`tags`]: Tag lists and leaf metrics
//! - [`schema`]: Sensor schema description types
//! - [`sensors`]: The built-in sensor schemas
//! - [`extractor`]: Per-sensor extraction with failure isolation
//! - [`dispatcher`]: Sensor registry and routing
//! - [`normalizer`]: Envelope-level normalization
//! - [`pipeline`]: Decode, normalize, encode and emit

// Modules
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod dispatcher;
pub mod document;
pub mod envelope;
pub mod error;
pub mod extractor;
pub mod normalizer;
pub mod pipeline;
pub mod record;
pub mod schema;
pub mod sensors;
pub mod tags;
mod traversal;

// Re-exports for convenient access
pub use clock::{epoch_seconds, ClockFn};
pub use config::{OutputFormat, ParserConfig};
pub use diagnostics::{
    Diagnostic, DiagnosticLevel, Diagnostics, LogDiagnostics, MemoryDiagnostics, NullDiagnostics,
};
pub use dispatcher::{DispatchOutcome, Dispatcher, SensorRegistry};
pub use document::{Scalar, SensorDocument};
pub use envelope::{EnvelopeDecoder, JsonEnvelopeDecoder, TelemetryEnvelope, JUNIPER_EXTENSION};
pub use error::{
    ConfigError, DecodeError, EntryError, JtiError, Result, SensorExtractionError, SinkError,
};
pub use extractor::{ExtractOutcome, Extractor};
pub use normalizer::{NormalizeReport, Normalizer};
pub use pipeline::{Pipeline, ProcessSummary};
pub use record::{clean_up_name, FormatRecordBuilder, Record, RecordBuilder, RecordSink, VecSink};
pub use schema::ExtractorSpec;
pub use sensors::BUILTIN_SENSORS;
pub use tags::{LeafMetric, Tag, TagList};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
