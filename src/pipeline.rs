//! End-to-end message processing: decode, normalize, encode, emit.

use crate::config::ParserConfig;
use crate::envelope::{EnvelopeDecoder, JsonEnvelopeDecoder};
use crate::error::SinkError;
use crate::normalizer::Normalizer;
use crate::record::{FormatRecordBuilder, RecordBuilder, RecordSink};

/// Outcome of processing one raw message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Records handed to the sink.
    pub records: usize,
    /// Sensor entries skipped after failing extraction.
    pub failed_entries: usize,
    /// Sensor keys without a registered extractor.
    pub unknown_sensors: Vec<String>,
    /// The message was dropped before any sensor was extracted.
    pub dropped: bool,
}

/// Decoder, normalizer, record builder and sink wired together.
#[derive(Debug)]
pub struct Pipeline<D, B, S> {
    decoder: D,
    normalizer: Normalizer,
    builder: B,
    sink: S,
}

impl<S: RecordSink> Pipeline<JsonEnvelopeDecoder, FormatRecordBuilder, S> {
    /// JSON envelopes in, records encoded per `config` out.
    pub fn from_config(config: &ParserConfig, normalizer: Normalizer, sink: S) -> Self {
        Self::new(
            JsonEnvelopeDecoder,
            normalizer,
            FormatRecordBuilder::new(config.output_format),
            sink,
        )
    }
}

impl<D, B, S> Pipeline<D, B, S>
where
    D: EnvelopeDecoder,
    B: RecordBuilder,
    S: RecordSink,
{
    pub fn new(decoder: D, normalizer: Normalizer, builder: B, sink: S) -> Self {
        Self {
            decoder,
            normalizer,
            builder,
            sink,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Give back the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Process one raw message.
    ///
    /// Only sink failures are returned; undecodable messages are dropped and
    /// reported through the normalizer's diagnostics.
    pub fn process(&mut self, raw: &[u8]) -> Result<ProcessSummary, SinkError> {
        let diag = self.normalizer.diagnostics();

        let envelope = match self.decoder.decode(raw) {
            Ok(envelope) => envelope,
            Err(err) => {
                diag.warn(&format!("Unable to decode message : {}", err));
                diag.debug(&format!(
                    "Unable to decode message, Data Dump : {}",
                    String::from_utf8_lossy(raw)
                ));
                return Ok(ProcessSummary {
                    dropped: true,
                    ..ProcessSummary::default()
                });
            }
        };

        let report = self.normalizer.normalize(&envelope);
        let mut summary = ProcessSummary {
            records: 0,
            failed_entries: report.failed_entries,
            unknown_sensors: report.unknown_sensors,
            dropped: report.dropped,
        };

        for metric in &report.metrics {
            let record = self.builder.build(&metric.tags);
            self.sink.emit(metric.timestamp_seconds, record)?;
            summary.records += 1;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::diagnostics::MemoryDiagnostics;
    use crate::record::{Record, VecSink};
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct FailingSink;

    impl RecordSink for FailingSink {
        fn emit(&mut self, _timestamp_seconds: u64, _record: Record) -> Result<(), SinkError> {
            Err(SinkError::Io("disk full".to_string()))
        }
    }

    fn lsp_message() -> Vec<u8> {
        json!({
            "system_id": "mx960",
            "timestamp": 1465467390000u64,
            "enterprise": {"juniperNetworks": {"jnpr_lsp_statistics_ext": {
                "lsp_stats_records": [{"name": "lsp-a", "packets": 5, "bytes": 500}]
            }}}
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn test_process_structured() {
        let config = ParserConfig::default();
        let diag = Arc::new(MemoryDiagnostics::default());
        let normalizer = Normalizer::default().with_diagnostics(diag.clone());
        let mut pipeline = Pipeline::from_config(&config, normalizer, VecSink::new());

        let summary = pipeline.process(&lsp_message()).unwrap();
        assert_eq!(summary.records, 2);
        assert!(!summary.dropped);

        let sink = pipeline.into_sink();
        assert_eq!(sink.records[0].0, 1_465_467_390);
        assert_eq!(
            Value::Object(sink.records[0].1.clone()),
            json!({"device": "mx960", "lspname": "lsp-a", "type": "lsp_stats.packets", "value": 5})
        );
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_process_flat() {
        let config = ParserConfig {
            output_format: OutputFormat::Flat,
        };
        let normalizer =
            Normalizer::default().with_diagnostics(Arc::new(MemoryDiagnostics::default()));
        let mut pipeline = Pipeline::from_config(&config, normalizer, VecSink::new());

        pipeline.process(&lsp_message()).unwrap();
        let record = &pipeline.sink().records[1].1;
        assert_eq!(
            record.get("device.mx960.lspname.lsp-a.type.lsp_stats_bytes"),
            Some(&json!(500))
        );
    }

    #[test]
    fn test_undecodable_message_dropped() {
        let diag = Arc::new(MemoryDiagnostics::default());
        let normalizer = Normalizer::default().with_diagnostics(diag.clone());
        let mut pipeline =
            Pipeline::from_config(&ParserConfig::default(), normalizer, VecSink::new());

        let summary = pipeline.process(b"not an envelope").unwrap();
        assert!(summary.dropped);
        assert_eq!(summary.records, 0);
        assert!(diag.warnings()[0].starts_with("Unable to decode message"));
        assert!(diag.debugs()[0].contains("not an envelope"));

        let summary = pipeline.process(&lsp_message()).unwrap();
        assert_eq!(summary.records, 2);
    }

    #[test]
    fn test_sink_failure_propagates() {
        let normalizer =
            Normalizer::default().with_diagnostics(Arc::new(MemoryDiagnostics::default()));
        let mut pipeline =
            Pipeline::from_config(&ParserConfig::default(), normalizer, FailingSink);

        let err = pipeline.process(&lsp_message()).unwrap_err();
        assert_eq!(err, SinkError::Io("disk full".to_string()));
    }
}
