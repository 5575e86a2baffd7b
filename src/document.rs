//! Typed view over decoded sensor payloads.
//!
//! Payloads are held as `serde_json` values with insertion order preserved,
//! so walking a document always visits fields in the order the device sent
//! them. The helpers here classify a value and fail with
//! [`EntryError::UnexpectedShape`] when it is not what the schema declares.

use crate::error::{EntryError, SensorExtractionError};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Mapping from sensor-type key to that sensor's payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorDocument {
    sensors: Map<String, Value>,
}

impl SensorDocument {
    /// Build a document from the decoded telemetry extension.
    pub fn from_value(value: Value) -> Result<Self, SensorExtractionError> {
        match value {
            Value::Object(sensors) => Ok(Self { sensors }),
            other => Err(SensorExtractionError::NotAMap {
                found: kind_of(&other),
            }),
        }
    }

    /// Payload for one sensor key.
    pub fn get(&self, sensor: &str) -> Option<&Value> {
        self.sensors.get(sensor)
    }

    /// Sensor keys and payloads in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.sensors.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

/// A scalar tag or metric value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Unsigned(u64),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Convert a JSON value, `None` for maps, lists and null.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Scalar::Text(s.clone())),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Some(Scalar::Unsigned(u))
                } else if let Some(i) = n.as_i64() {
                    Some(Scalar::Integer(i))
                } else {
                    n.as_f64().map(Scalar::Float)
                }
            }
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Convert back to a JSON value for record building.
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Text(s) => Value::String(s.clone()),
            Scalar::Unsigned(u) => Value::from(*u),
            Scalar::Integer(i) => Value::from(*i),
            Scalar::Float(f) => Value::from(*f),
            Scalar::Bool(b) => Value::Bool(*b),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Scalar::Unsigned(u) => Some(*u),
            Scalar::Integer(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Unsigned(u) => write!(f, "{}", u),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Unsigned(u) => serializer.serialize_u64(*u),
            Scalar::Integer(i) => serializer.serialize_i64(*i),
            Scalar::Float(v) => serializer.serialize_f64(*v),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<u64> for Scalar {
    fn from(u: u64) -> Self {
        Scalar::Unsigned(u)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// Short name of a value's kind, used in diagnostics.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "map",
        Value::Array(_) => "list",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "bool",
        Value::Null => "null",
    }
}

pub(crate) fn expect_map<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a Map<String, Value>, EntryError> {
    value.as_object().ok_or_else(|| unexpected(path, "map", value))
}

pub(crate) fn expect_list<'a>(value: &'a Value, path: &str) -> Result<&'a [Value], EntryError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| unexpected(path, "list", value))
}

pub(crate) fn expect_scalar(value: &Value, path: &str) -> Result<Scalar, EntryError> {
    Scalar::from_json(value).ok_or_else(|| unexpected(path, "scalar", value))
}

fn unexpected(path: &str, expected: &'static str, value: &Value) -> EntryError {
    EntryError::UnexpectedShape {
        path: path.to_string(),
        expected,
        found: kind_of(value),
    }
}
