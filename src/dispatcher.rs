//! Routing of sensor documents to extractors.

use crate::diagnostics::Diagnostics;
use crate::document::SensorDocument;
use crate::extractor::Extractor;
use crate::schema::ExtractorSpec;
use crate::sensors::BUILTIN_SENSORS;
use crate::tags::LeafMetric;
use std::collections::HashMap;

/// Static mapping from sensor-type key to extractor.
#[derive(Debug, Clone, Default)]
pub struct SensorRegistry {
    extractors: HashMap<&'static str, Extractor>,
}

impl SensorRegistry {
    /// Registry of the built-in sensor types.
    pub fn builtin() -> Self {
        Self::from_specs(BUILTIN_SENSORS)
    }

    /// Registry of the given specs; a later spec replaces an earlier one with the same key.
    pub fn from_specs(specs: &'static [ExtractorSpec]) -> Self {
        let extractors = specs
            .iter()
            .map(|spec| (spec.sensor, Extractor::new(spec)))
            .collect();
        Self { extractors }
    }

    pub fn get(&self, sensor: &str) -> Option<&Extractor> {
        self.extractors.get(sensor)
    }

    pub fn contains(&self, sensor: &str) -> bool {
        self.extractors.contains_key(sensor)
    }

    /// Registered sensor keys, sorted.
    pub fn sensors(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self.extractors.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

/// What dispatching one sensor document produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchOutcome {
    pub metrics: Vec<LeafMetric>,
    pub unknown_sensors: Vec<String>,
    pub failed_entries: usize,
}

/// Routes each sensor key of a document to its extractor.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: SensorRegistry,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(SensorRegistry::builtin())
    }
}

impl Dispatcher {
    pub fn new(registry: SensorRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    /// Extract every known sensor of `document`, in document order.
    pub fn dispatch(
        &self,
        device: &str,
        timestamp_seconds: u64,
        document: &SensorDocument,
        diag: &dyn Diagnostics,
    ) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        for (sensor, payload) in document.iter() {
            match self.registry.get(sensor) {
                Some(extractor) => {
                    let extracted = extractor.extract(device, timestamp_seconds, payload, diag);
                    outcome.metrics.extend(extracted.metrics);
                    outcome.failed_entries += extracted.failed_entries;
                }
                None => {
                    diag.warn(&format!("Unsupported sensor : {}", sensor));
                    outcome.unknown_sensors.push(sensor.to_string());
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemoryDiagnostics;
    use crate::schema::{GroupSpec, TagRule};
    use serde_json::json;

    static CUSTOM: &[ExtractorSpec] = &[ExtractorSpec {
        sensor: "custom_ext",
        resource: "/custom/",
        entries: "records",
        tags: &[TagRule::optional("id", "id")],
        discard: &[],
        body: &GroupSpec::SCALARS,
    }];

    #[test]
    fn test_builtin_registry() {
        let registry = SensorRegistry::builtin();
        assert_eq!(registry.len(), 8);
        assert!(registry.contains("jnpr_interface_ext"));
        assert!(registry.contains("jnprLogicalInterfaceExt"));
        assert!(!registry.contains("foo_ext"));
        assert_eq!(registry.sensors()[0], "cpu_memory_util_ext");
    }

    #[test]
    fn test_custom_registry() {
        let dispatcher = Dispatcher::new(SensorRegistry::from_specs(CUSTOM));
        let diag = MemoryDiagnostics::default();
        let doc = SensorDocument::from_value(json!({
            "custom_ext": {"records": [{"id": "a", "count": 3}]},
            "jnpr_interface_ext": {"interface_stats": []}
        }))
        .unwrap();

        let outcome = dispatcher.dispatch("mx", 5, &doc, &diag);
        assert_eq!(outcome.metrics.len(), 1);
        assert_eq!(outcome.metrics[0].metric_type(), Some("count"));
        assert_eq!(outcome.unknown_sensors, vec!["jnpr_interface_ext"]);
    }

    #[test]
    fn test_unknown_sensor_warns_once() {
        let dispatcher = Dispatcher::default();
        let diag = MemoryDiagnostics::default();
        let doc = SensorDocument::from_value(json!({
            "foo_ext": {"anything": 1},
            "jnpr_lsp_statistics_ext": {
                "lsp_stats_records": [{"name": "lsp1", "packets": 4}]
            }
        }))
        .unwrap();

        let outcome = dispatcher.dispatch("mx", 5, &doc, &diag);
        assert_eq!(outcome.metrics.len(), 1);
        assert_eq!(outcome.unknown_sensors, vec!["foo_ext"]);
        assert_eq!(diag.warnings(), vec!["Unsupported sensor : foo_ext"]);
    }
}
