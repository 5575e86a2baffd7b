//! Record construction and delivery.
//!
//! The normalizer produces tag lists; turning a tag list into the record a
//! downstream pipeline stores, and delivering it, happens here behind the
//! [`RecordBuilder`] and [`RecordSink`] traits so deployments can plug in
//! their own encodings.

use crate::config::OutputFormat;
use crate::error::SinkError;
use crate::tags::{TagList, VALUE_TAG};
use serde_json::{Map, Value};

/// An encoded record, keys in insertion order.
pub type Record = Map<String, Value>;

/// Replace characters that are separators in flat metric names.
pub fn clean_up_name(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '/' | ':' | '.' => '_',
            other => other,
        })
        .collect()
}

/// Encodes one tag list into a record.
pub trait RecordBuilder {
    fn build(&self, tags: &TagList) -> Record;
}

/// Encodes tag lists according to an [`OutputFormat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatRecordBuilder {
    format: OutputFormat,
}

impl FormatRecordBuilder {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

impl RecordBuilder for FormatRecordBuilder {
    fn build(&self, tags: &TagList) -> Record {
        match self.format {
            OutputFormat::Structured => build_structured(tags),
            OutputFormat::Flat => {
                let (name, value) = flat_name(tags);
                let mut record = Record::new();
                record.insert(name, value);
                record
            }
            OutputFormat::Statsd => {
                let (name, value) = flat_name(tags);
                let mut record = Record::new();
                record.insert("statsd_type".to_string(), Value::from("gauge"));
                record.insert("statsd_key".to_string(), Value::from(name.to_lowercase()));
                record.insert("statsd_gauge".to_string(), value);
                record
            }
        }
    }
}

/// One key per tag; a repeated key keeps its first position and last value.
fn build_structured(tags: &TagList) -> Record {
    let mut record = Record::new();
    for tag in tags {
        record.insert(tag.key.clone(), tag.value.to_json());
    }
    record
}

/// `key.value` pairs of every non-value tag joined with dots, and the value.
fn flat_name(tags: &TagList) -> (String, Value) {
    let mut name = String::new();
    let mut value = Value::Null;

    for tag in tags {
        if tag.key == VALUE_TAG {
            value = tag.value.to_json();
            continue;
        }
        if !name.is_empty() {
            name.push('.');
        }
        name.push_str(&tag.key);
        name.push('.');
        name.push_str(&clean_up_name(&tag.value.to_string()));
    }

    (name, value)
}

/// Receives finished records.
pub trait RecordSink {
    fn emit(&mut self, timestamp_seconds: u64, record: Record) -> Result<(), SinkError>;
}

/// Collects records in memory.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    pub records: Vec<(u64, Record)>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSink for VecSink {
    fn emit(&mut self, timestamp_seconds: u64, record: Record) -> Result<(), SinkError> {
        self.records.push((timestamp_seconds, record));
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn emit(&mut self, timestamp_seconds: u64, record: Record) -> Result<(), SinkError> {
        (**self).emit(timestamp_seconds, record)
    }
}
