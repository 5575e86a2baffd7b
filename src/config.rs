//! Parser configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How each tag list is encoded into a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputFormat {
    /// One record key per tag.
    #[default]
    Structured,
    /// One record key built from every tag, mapped to the value.
    Flat,
    /// statsd gauge record.
    Statsd,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Structured => "structured",
            OutputFormat::Flat => "flat",
            OutputFormat::Statsd => "statsd",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "structured" => Ok(OutputFormat::Structured),
            "flat" => Ok(OutputFormat::Flat),
            "statsd" => Ok(OutputFormat::Statsd),
            other => Err(ConfigError::InvalidOutputFormat(other.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.as_str().to_string()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated parser settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Record encoding (default: structured).
    pub output_format: OutputFormat,
}

impl ParserConfig {
    /// Build from a raw `output_format` setting.
    pub fn new(output_format: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            output_format: output_format.parse()?,
        })
    }

    /// Parse from a JSON object, validating every field.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawParserConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        match raw.output_format {
            Some(format) => Self::new(&format),
            None => Ok(Self::default()),
        }
    }
}

/// Settings as written, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawParserConfig {
    output_format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_structured() {
        assert_eq!(ParserConfig::default().output_format, OutputFormat::Structured);
    }

    #[test]
    fn test_valid_formats() {
        for (raw, expected) in [
            ("structured", OutputFormat::Structured),
            ("flat", OutputFormat::Flat),
            ("statsd", OutputFormat::Statsd),
        ] {
            let config = ParserConfig::new(raw).unwrap();
            assert_eq!(config.output_format, expected);
            assert_eq!(expected.to_string(), raw);
        }
    }

    #[test]
    fn test_invalid_format_rejected() {
        let err = ParserConfig::new("influx").unwrap_err();
        assert_eq!(err, ConfigError::InvalidOutputFormat("influx".to_string()));
    }

    #[test]
    fn test_from_json() {
        let config = ParserConfig::from_json(r#"{"output_format": "statsd"}"#).unwrap();
        assert_eq!(config.output_format, OutputFormat::Statsd);

        let config = ParserConfig::from_json("{}").unwrap();
        assert_eq!(config.output_format, OutputFormat::Structured);

        let err = ParserConfig::from_json(r#"{"output_format": "xml"}"#).unwrap_err();
        assert_eq!(err, ConfigError::InvalidOutputFormat("xml".to_string()));

        let err = ParserConfig::from_json("{output_format").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn test_from_json_rejects_value_with_quote() {
        let err = ParserConfig::from_json(r#"{"output_format": "it's"}"#).unwrap_err();
        assert_eq!(err, ConfigError::InvalidOutputFormat("it's".to_string()));

        let err = ParserConfig::from_json(r#"{"output_format": 3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&ParserConfig::new("flat").unwrap()).unwrap();
        assert_eq!(json, r#"{"output_format":"flat"}"#);
    }
}
