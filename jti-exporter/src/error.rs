// JTI Exporter - Error types
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Error types for the exporter binary.

use jti::{ConfigError, SinkError};
use thiserror::Error;

/// Errors that stop the exporter.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Invalid command-line configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading the input failed
    #[error("Input error: {0}")]
    Input(#[from] std::io::Error),

    /// Writing records failed
    #[error("Output error: {0}")]
    Output(#[from] SinkError),

    /// The self-metrics endpoint could not be started
    #[error("Metrics server error: {0}")]
    Server(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: ExporterError = ConfigError::InvalidOutputFormat("xml".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: output_format value 'xml' is not valid. Must be : structured, flat or statsd"
        );

        let err: ExporterError = SinkError::Io("disk full".to_string()).into();
        assert!(err.to_string().contains("disk full"));
    }
}
