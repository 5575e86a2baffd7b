// JTI Exporter - JSON lines output
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! File sink writing one JSON object per record.
//!
//! Each line is the record itself; the timestamp is not written. The file
//! is opened in append mode so restarts never truncate earlier output.

use jti::{Record, RecordSink, SinkError};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends records to a file as JSON lines.
#[derive(Debug)]
pub struct FileJsonSink {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl FileJsonSink {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records written since the sink was opened.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl RecordSink for FileJsonSink {
    fn emit(&mut self, _timestamp_seconds: u64, record: Record) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, &record)
            .map_err(|e| SinkError::Serialize(e.to_string()))?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn record(value: u64) -> Record {
        let mut record = Record::new();
        record.insert("device".to_string(), json!("mx960"));
        record.insert("type".to_string(), json!("lsp_stats.packets"));
        record.insert("value".to_string(), json!(value));
        record
    }

    #[test]
    fn test_writes_json_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        let mut sink = FileJsonSink::open(&path).unwrap();
        sink.emit(100, record(1)).unwrap();
        sink.emit(101, record(2)).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.written(), 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            json!({"device": "mx960", "type": "lsp_stats.packets", "value": 2})
        );
        assert!(content.starts_with(r#"{"device":"mx960","type":"lsp_stats.packets","value":1}"#));
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        {
            let mut sink = FileJsonSink::open(&path).unwrap();
            sink.emit(1, record(1)).unwrap();
            sink.flush().unwrap();
        }
        {
            let mut sink = FileJsonSink::open(&path).unwrap();
            sink.emit(2, record(2)).unwrap();
            sink.flush().unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_open_in_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let err = FileJsonSink::open(dir.path().join("nope").join("out.json")).unwrap_err();
        assert!(matches!(err, SinkError::Io(_)));
    }
}
