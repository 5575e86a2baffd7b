//! Error types for JTI normalization
//!
//! Each tier of failure has its own enum so callers can tell how much of a
//! message was lost: a whole envelope, a whole sensor document, or a single
//! repeated-group entry.

use thiserror::Error;

/// Result type alias for JTI operations
pub type Result<T> = std::result::Result<T, JtiError>;

/// Main error type for JTI operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JtiError {
    /// Envelope decoding error
    #[error("Decoding error: {0}")]
    Decode(#[from] DecodeError),

    /// Sensor document extraction error
    #[error("Sensor extraction error: {0}")]
    Sensor(#[from] SensorExtractionError),

    /// Entry extraction error
    #[error("Entry extraction error: {0}")]
    Entry(#[from] EntryError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sink error
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Errors while turning raw bytes into a [`TelemetryEnvelope`](crate::TelemetryEnvelope)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Bytes are not a well-formed envelope
    #[error("Malformed envelope: {0}")]
    Malformed(String),

    /// Envelope is well-formed but lacks a mandatory field
    #[error("Missing envelope field: {0}")]
    MissingField(&'static str),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Malformed(err.to_string())
    }
}

/// Errors while locating the sensor document inside an envelope
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SensorExtractionError {
    /// The envelope carries no Juniper telemetry extension
    #[error("Envelope has no enterprise.juniperNetworks extension")]
    MissingExtension,

    /// The extension exists but is not a map of sensor documents
    #[error("Sensor extension must be a map, found {found}")]
    NotAMap { found: &'static str },
}

/// Errors while extracting one entry of a sensor's repeated group
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryError {
    /// A required identifying field is absent
    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    /// A field holds a different kind of value than its schema declares
    #[error("Field '{path}' expected {expected}, found {found}")]
    UnexpectedShape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Output format is not one of the supported modes
    #[error("output_format value '{0}' is not valid. Must be : structured, flat or statsd")]
    InvalidOutputFormat(String),

    /// Configuration document could not be parsed
    #[error("Malformed configuration: {0}")]
    Malformed(String),
}

/// Errors reported by a record sink
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SinkError {
    /// Writing the record failed
    #[error("I/O error: {0}")]
    Io(String),

    /// The record could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        SinkError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = JtiError::Entry(EntryError::UnexpectedShape {
            path: "ingress_stats".to_string(),
            expected: "map",
            found: "number",
        });
        let msg = format!("{}", err);
        assert!(msg.contains("ingress_stats"));
        assert!(msg.contains("expected map"));
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::InvalidOutputFormat("json".to_string());
        assert_eq!(
            err.to_string(),
            "output_format value 'json' is not valid. Must be : structured, flat or statsd"
        );
    }

    #[test]
    fn test_error_conversion() {
        let decode_err = DecodeError::MissingField("system_id");
        let jti_err: JtiError = decode_err.into();
        assert!(matches!(jti_err, JtiError::Decode(_)));
    }

    #[test]
    fn test_serde_error_becomes_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let decode_err: DecodeError = err.into();
        assert!(matches!(decode_err, DecodeError::Malformed(_)));
    }
}
