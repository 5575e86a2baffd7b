// JTI Exporter - Juniper telemetry to JSON lines
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # JTI Exporter
//!
//! Reads decoded Juniper JTI envelopes (one JSON object per line), normalizes
//! them and appends the records to a JSON lines file.
//!
//! ## Usage
//!
//! ```bash
//! # Normalize a capture into the default output file
//! jti-exporter --input capture.jsonl
//!
//! # Stream from stdin, statsd-style records, with self-metrics on :9100
//! collector | jti-exporter --output-format statsd --metrics-port 9100
//! ```

mod diagnostics;
mod error;
mod metrics;
mod sink;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use clap::Parser;
use diagnostics::TracingDiagnostics;
use error::ExporterError;
use jti::{
    FormatRecordBuilder, JsonEnvelopeDecoder, Normalizer, ParserConfig, Pipeline, ProcessSummary,
    RecordSink,
};
use sink::FileJsonSink;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// JTI telemetry exporter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File of JSON envelopes, one per line (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// File the records are appended to
    #[arg(short, long, default_value = "jti_output.json")]
    output: PathBuf,

    /// Record encoding (structured, flat, statsd)
    #[arg(long, default_value = "structured")]
    output_format: String,

    /// Serve Prometheus self-metrics on this port
    #[arg(long)]
    metrics_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Counts accumulated over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RunTotals {
    messages: usize,
    records: usize,
    dropped: usize,
    failed_entries: usize,
    unknown_sensors: usize,
}

impl RunTotals {
    fn add(&mut self, summary: &ProcessSummary) {
        self.messages += 1;
        self.records += summary.records;
        self.failed_entries += summary.failed_entries;
        self.unknown_sensors += summary.unknown_sensors.len();
        if summary.dropped {
            self.dropped += 1;
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("JTI Exporter v{} (jti {})", env!("CARGO_PKG_VERSION"), jti::VERSION);

    match run(&args).await {
        Ok(totals) => info!(
            "Processed {} messages: {} records, {} dropped, {} failed entries, {} unsupported sensors",
            totals.messages,
            totals.records,
            totals.dropped,
            totals.failed_entries,
            totals.unknown_sensors
        ),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

async fn run(args: &Args) -> Result<RunTotals, ExporterError> {
    // Invalid output formats fail before anything is read
    let config = ParserConfig::new(&args.output_format)?;

    if let Some(port) = args.metrics_port {
        spawn_metrics_server(port).await?;
    }

    let sink = FileJsonSink::open(&args.output)?;
    info!(
        "Writing {} records to {}",
        config.output_format,
        sink.path().display()
    );

    let normalizer = Normalizer::default().with_diagnostics(Arc::new(TracingDiagnostics));
    let mut pipeline = Pipeline::from_config(&config, normalizer, sink);

    let totals = match &args.input {
        Some(path) => {
            info!("Reading envelopes from {}", path.display());
            let file = tokio::fs::File::open(path).await?;
            process_lines(file, &mut pipeline).await
        }
        None => {
            info!("Reading envelopes from stdin");
            process_lines(tokio::io::stdin(), &mut pipeline).await
        }
    };

    // Keep what was written before a failure
    pipeline.sink_mut().flush()?;
    totals
}

/// Feed every non-blank line of `reader` through the pipeline.
async fn process_lines<R, S>(
    reader: R,
    pipeline: &mut Pipeline<JsonEnvelopeDecoder, FormatRecordBuilder, S>,
) -> Result<RunTotals, ExporterError>
where
    R: AsyncRead + Unpin,
    S: RecordSink,
{
    let mut lines = BufReader::new(reader).lines();
    let mut totals = RunTotals::default();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let summary = pipeline.process(line.as_bytes())?;
        metrics::record_summary(&summary);
        totals.add(&summary);
    }

    Ok(totals)
}

async fn spawn_metrics_server(port: u16) -> Result<(), ExporterError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ExporterError::Server(format!("cannot bind {}: {}", addr, e)))?;

    let app = Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler));

    info!("Metrics endpoint: http://{}/metrics", addr);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Metrics server stopped: {}", e);
        }
    });

    Ok(())
}

/// Metrics handler - returns Prometheus text format.
async fn metrics_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("Content-Type", "text/plain; charset=utf-8")],
        metrics::encode_metrics(),
    )
}

/// Health check handler.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
