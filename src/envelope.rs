//! Telemetry envelopes and the decode collaborator.
//!
//! A device streams one envelope per export interval. The sensor payloads
//! live in a vendor extension, `enterprise.juniperNetworks`, keyed by
//! sensor type.

use crate::document::{kind_of, SensorDocument};
use crate::error::{DecodeError, SensorExtractionError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Enterprise extension key holding the Juniper sensor document.
pub const JUNIPER_EXTENSION: &str = "juniperNetworks";

/// One decoded streaming-telemetry message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEnvelope {
    /// Device name as configured on the router.
    pub system_id: String,

    /// Line card / component that exported the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<u32>,

    /// Sensor name as configured on the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_name: Option<String>,

    /// Per-sensor sequence number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u32>,

    /// Device clock (seconds, milliseconds or microseconds since epoch).
    pub timestamp: u64,

    /// Vendor extensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise: Option<Value>,
}

impl TelemetryEnvelope {
    /// Minimal envelope carrying an already-built Juniper extension.
    pub fn new(system_id: impl Into<String>, timestamp: u64, juniper: Value) -> Self {
        let mut enterprise = serde_json::Map::new();
        enterprise.insert(JUNIPER_EXTENSION.to_string(), juniper);
        Self {
            system_id: system_id.into(),
            component_id: None,
            sensor_name: None,
            sequence_number: None,
            timestamp,
            enterprise: Some(Value::Object(enterprise)),
        }
    }

    /// Locate the Juniper sensor document.
    pub fn sensor_document(&self) -> Result<SensorDocument, SensorExtractionError> {
        let extension = self
            .enterprise
            .as_ref()
            .and_then(|e| e.get(JUNIPER_EXTENSION))
            .ok_or(SensorExtractionError::MissingExtension)?;

        SensorDocument::from_value(extension.clone())
    }
}

/// Turns raw message bytes into an envelope.
pub trait EnvelopeDecoder {
    fn decode(&self, raw: &[u8]) -> Result<TelemetryEnvelope, DecodeError>;
}

/// Decodes envelopes rendered as JSON objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEnvelopeDecoder;

impl EnvelopeDecoder for JsonEnvelopeDecoder {
    fn decode(&self, raw: &[u8]) -> Result<TelemetryEnvelope, DecodeError> {
        let value: Value = serde_json::from_slice(raw)?;
        let object = value.as_object().ok_or_else(|| {
            DecodeError::Malformed(format!("expected object, found {}", kind_of(&value)))
        })?;

        for field in ["system_id", "timestamp"] {
            if object.get(field).map_or(true, Value::is_null) {
                return Err(DecodeError::MissingField(field));
            }
        }

        Ok(serde_json::from_value(value)?)
    }
}
