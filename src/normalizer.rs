//! Message-level normalization.
//!
//! A [`Normalizer`] owns everything a message needs beyond its own bytes:
//! the sensor dispatcher, the diagnostics sink and the clock conversion.
//! It holds no mutable state, so one instance can be shared across threads.

use crate::clock::{epoch_seconds, ClockFn};
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::dispatcher::{Dispatcher, SensorRegistry};
use crate::envelope::TelemetryEnvelope;
use crate::tags::LeafMetric;
use std::sync::Arc;

/// Result of normalizing one envelope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeReport {
    /// Leaf metrics in document order.
    pub metrics: Vec<LeafMetric>,
    /// Sensor keys without a registered extractor.
    pub unknown_sensors: Vec<String>,
    /// Entries skipped because they failed extraction.
    pub failed_entries: usize,
    /// The sensor document could not be located; nothing was extracted.
    pub dropped: bool,
}

impl NormalizeReport {
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Turns telemetry envelopes into leaf metrics.
#[derive(Clone)]
pub struct Normalizer {
    dispatcher: Dispatcher,
    diag: Arc<dyn Diagnostics>,
    clock: ClockFn,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(SensorRegistry::builtin())
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl Normalizer {
    /// Normalizer over `registry`, logging through the `log` facade.
    pub fn new(registry: SensorRegistry) -> Self {
        Self {
            dispatcher: Dispatcher::new(registry),
            diag: Arc::new(LogDiagnostics::new()),
            clock: epoch_seconds,
        }
    }

    /// Replace the diagnostics sink.
    pub fn with_diagnostics(mut self, diag: Arc<dyn Diagnostics>) -> Self {
        self.diag = diag;
        self
    }

    /// Replace the device timestamp conversion.
    pub fn with_clock(mut self, clock: ClockFn) -> Self {
        self.clock = clock;
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diag.as_ref()
    }

    /// Normalize one envelope.
    ///
    /// Never fails: a missing or malformed sensor document drops the message
    /// and is reported through diagnostics, as are failed entries and
    /// unsupported sensors.
    pub fn normalize(&self, envelope: &TelemetryEnvelope) -> NormalizeReport {
        let device = envelope.system_id.as_str();
        let timestamp_seconds = (self.clock)(envelope.timestamp);

        let document = match envelope.sensor_document() {
            Ok(document) => document,
            Err(err) => {
                self.diag.warn(&format!(
                    "Unable to extract sensor data sensor from {} : {}",
                    device, err
                ));
                self.diag.debug(&format!(
                    "Unable to extract sensor data sensor from {}, Data Dump : {:?}",
                    device, envelope.enterprise
                ));
                return NormalizeReport {
                    dropped: true,
                    ..NormalizeReport::default()
                };
            }
        };

        let outcome =
            self.dispatcher
                .dispatch(device, timestamp_seconds, &document, self.diag.as_ref());

        NormalizeReport {
            metrics: outcome.metrics,
            unknown_sensors: outcome.unknown_sensors,
            failed_entries: outcome.failed_entries,
            dropped: false,
        }
    }
}
