// JTI Exporter - Prometheus metrics definitions
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Prometheus counters describing the exporter's own processing.

use jti::ProcessSummary;
use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Messages read from the input.
    pub static ref MESSAGES_TOTAL: IntCounter = register_int_counter!(
        "jti_messages_total",
        "Telemetry messages read from the input"
    ).unwrap();

    /// Messages dropped before any sensor was extracted.
    pub static ref MESSAGES_DROPPED_TOTAL: IntCounter = register_int_counter!(
        "jti_messages_dropped_total",
        "Telemetry messages dropped (undecodable or without sensor data)"
    ).unwrap();

    /// Records written to the output.
    pub static ref RECORDS_TOTAL: IntCounter = register_int_counter!(
        "jti_records_total",
        "Normalized records written to the output"
    ).unwrap();

    /// Sensor entries skipped after failing extraction.
    pub static ref FAILED_ENTRIES_TOTAL: IntCounter = register_int_counter!(
        "jti_failed_entries_total",
        "Sensor entries skipped because they failed extraction"
    ).unwrap();

    /// Unsupported sensor keys, by key.
    pub static ref UNKNOWN_SENSORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "jti_unknown_sensors_total",
        "Sensor documents without a registered extractor",
        &["sensor"]
    ).unwrap();
}

/// Account for one processed message.
pub fn record_summary(summary: &ProcessSummary) {
    MESSAGES_TOTAL.inc();
    if summary.dropped {
        MESSAGES_DROPPED_TOTAL.inc();
    }
    RECORDS_TOTAL.inc_by(summary.records as u64);
    FAILED_ENTRIES_TOTAL.inc_by(summary.failed_entries as u64);
    for sensor in &summary.unknown_sensors {
        UNKNOWN_SENSORS_TOTAL.with_label_values(&[sensor.as_str()]).inc();
    }
}

/// Encode all metrics in Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_summary() {
        let records_before = RECORDS_TOTAL.get();
        let dropped_before = MESSAGES_DROPPED_TOTAL.get();

        record_summary(&ProcessSummary {
            records: 3,
            failed_entries: 1,
            unknown_sensors: vec!["foo_ext".to_string()],
            dropped: false,
        });
        record_summary(&ProcessSummary {
            dropped: true,
            ..ProcessSummary::default()
        });

        // other tests in this binary share the registry
        assert!(RECORDS_TOTAL.get() - records_before >= 3);
        assert!(MESSAGES_DROPPED_TOTAL.get() - dropped_before >= 1);
        assert!(UNKNOWN_SENSORS_TOTAL.with_label_values(&["foo_ext"]).get() >= 1);
    }

    #[test]
    fn test_encode_metrics() {
        MESSAGES_TOTAL.inc();
        let output = encode_metrics();
        assert!(output.contains("jti_messages_total"));
    }
}
