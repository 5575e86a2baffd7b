//! Per-sensor extraction with per-entry failure isolation.
//!
//! Each entry of a sensor's repeated group is extracted into its own
//! `Result`. Successful entries contribute their records; failed entries are
//! reported through [`Diagnostics`] and contribute nothing, so a malformed
//! entry never costs its siblings anything.

use crate::diagnostics::Diagnostics;
use crate::document::{expect_map, kind_of};
use crate::error::EntryError;
use crate::schema::ExtractorSpec;
use crate::tags::{LeafMetric, TagList};
use crate::traversal::{apply_tag_rules, Walker};
use serde_json::Value;

/// Records and failure count for one sensor key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractOutcome {
    pub metrics: Vec<LeafMetric>,
    pub failed_entries: usize,
}

/// Extractor for one sensor type.
#[derive(Debug, Clone, Copy)]
pub struct Extractor {
    spec: &'static ExtractorSpec,
}

impl Extractor {
    pub fn new(spec: &'static ExtractorSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &'static ExtractorSpec {
        self.spec
    }

    pub fn sensor(&self) -> &'static str {
        self.spec.sensor
    }

    /// Extract every entry of one sensor payload.
    pub fn extract(
        &self,
        device: &str,
        timestamp_seconds: u64,
        payload: &Value,
        diag: &dyn Diagnostics,
    ) -> ExtractOutcome {
        let sensor = self.spec.sensor;
        let mut outcome = ExtractOutcome::default();

        diag.debug(&format!(
            "Will extract info for Sensor: {} / Resource {}",
            sensor, self.spec.resource
        ));

        let payload_map = match payload {
            Value::Object(map) => map,
            Value::Null => {
                diag.debug(&format!("Sensor {} from {} has no data", sensor, device));
                return outcome;
            }
            _ => {
                diag.warn(&format!(
                    "Unable to parse {} sensor, payload must be a map, found {}",
                    sensor,
                    kind_of(payload)
                ));
                diag.debug(&format!(
                    "Unable to parse {} sensor, Data Dump : {}",
                    sensor, payload
                ));
                return outcome;
            }
        };

        let entries = match payload_map.get(self.spec.entries) {
            Some(Value::Array(entries)) => entries,
            None | Some(Value::Null) => {
                diag.debug(&format!(
                    "Sensor {} from {} has no '{}' entries",
                    sensor, device, self.spec.entries
                ));
                return outcome;
            }
            Some(other) => {
                diag.warn(&format!(
                    "Unable to parse {} sensor, '{}' must be a list, found {}",
                    sensor,
                    self.spec.entries,
                    kind_of(other)
                ));
                diag.debug(&format!(
                    "Unable to parse {} sensor, Data Dump : {}",
                    sensor, payload
                ));
                return outcome;
            }
        };

        for entry in entries {
            match self.extract_entry(device, timestamp_seconds, entry) {
                Ok(metrics) => outcome.metrics.extend(metrics),
                Err(err) => {
                    outcome.failed_entries += 1;
                    diag.warn(&format!(
                        "Unable to parse {} sensor, Error during processing: {}",
                        sensor, err
                    ));
                    diag.debug(&format!(
                        "Unable to parse {} sensor, Data Dump : {}",
                        sensor, entry
                    ));
                }
            }
        }

        outcome
    }

    /// Extract one entry: identifying tags first, then the metric walk.
    pub fn extract_entry(
        &self,
        device: &str,
        timestamp_seconds: u64,
        entry: &Value,
    ) -> Result<Vec<LeafMetric>, EntryError> {
        let map = expect_map(entry, self.spec.entries)?;

        let mut tags = TagList::for_device(device);
        apply_tag_rules(self.spec.tags, map, &mut tags)?;
        let consumed = self.spec.consumed_fields();

        let mut metrics = Vec::new();
        let mut walker = Walker::new(timestamp_seconds, &mut metrics);
        let body = self.spec.body;
        if let Some(label) = body.label {
            walker.enter(label);
        }
        walker.walk_group(body, map, &consumed, &tags)?;

        Ok(metrics)
    }
}
