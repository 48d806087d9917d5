//! Converted ("jsonic") values.
//!
//! A [`JsonicValue`] is what the converter produces: decoded JSON lifted into
//! richer categories (sets, tuples, dates, decimals, byte blobs, named records).

mod set;

pub use set::JsonicSet;

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use base64::Engine;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

/// Named keyed record: member name to converted value, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub fields: IndexMap<String, JsonicValue>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: JsonicValue) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&JsonicValue> {
        self.fields.get(key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsonicValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Decimal(Decimal),
    Date(Date),
    DateTime(OffsetDateTime),
    /// Mutable sequence.
    List(Vec<JsonicValue>),
    /// Immutable sequence.
    Tuple(Vec<JsonicValue>),
    Set(JsonicSet),
    /// Mapping or dynamic keyed record.
    Object(IndexMap<String, JsonicValue>),
    Record(Record),
    NamedTuple(Record),
}

impl JsonicValue {
    /// Lift a decoded value without coercion: arrays become lists, objects
    /// become mappings, integral numbers become ints.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Str(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Render back into a decoded JSON value. Bytes become base64 text,
    /// decimals become strings and dates become ISO-8601 strings.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Str(s) => Value::String(s.clone()),
            Self::Bytes(b) => Value::String(base64::engine::general_purpose::STANDARD.encode(b)),
            Self::Decimal(d) => Value::String(d.to_string()),
            Self::Date(d) => Value::String(d.to_string()),
            Self::DateTime(dt) => Value::String(dt.format(&Rfc3339).unwrap_or_else(|_| dt.to_string())),
            Self::List(items) | Self::Tuple(items) => {
                Value::Array(items.iter().map(Self::to_json).collect())
            }
            Self::Set(set) => Value::Array(set.iter().map(Self::to_json).collect()),
            Self::Object(map) => Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Self::Record(r) => Value::Object(
                r.fields.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Self::NamedTuple(r) => Value::Array(r.fields.values().map(Self::to_json).collect()),
        }
    }

    /// Category name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::Decimal(_) => "decimal",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Set(_) => "set",
            Self::Object(_) => "mapping",
            Self::Record(_) => "record",
            Self::NamedTuple(_) => "namedtuple",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of a list, tuple or named tuple.
    pub fn as_slice(&self) -> Option<Vec<&JsonicValue>> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items.iter().collect()),
            Self::NamedTuple(r) => Some(r.fields.values().collect()),
            _ => None,
        }
    }

    /// Member lookup on mappings, records and named tuples.
    pub fn get(&self, key: &str) -> Option<&JsonicValue> {
        match self {
            Self::Object(map) => map.get(key),
            Self::Record(r) | Self::NamedTuple(r) => r.get(key),
            _ => None,
        }
    }
}

impl fmt::Display for JsonicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// Consistent with `PartialEq`: `0.0` and `-0.0` hash alike, decimals hash
/// normalized, datetimes hash by instant and mappings, records and sets hash
/// independently of member order.
impl Hash for JsonicValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(i) => i.hash(state),
            Self::Float(f) => {
                let f = if *f == 0.0 { 0.0 } else { *f };
                f.to_bits().hash(state);
            }
            Self::Str(s) => s.hash(state),
            Self::Bytes(b) => b.hash(state),
            Self::Decimal(d) => d.normalize().hash(state),
            Self::Date(d) => d.hash(state),
            Self::DateTime(dt) => dt.unix_timestamp_nanos().hash(state),
            Self::List(items) | Self::Tuple(items) => items.hash(state),
            Self::Set(set) => hash_unordered(set.iter(), state),
            Self::Object(map) => hash_unordered(map.iter(), state),
            Self::Record(r) | Self::NamedTuple(r) => {
                r.name.hash(state);
                hash_unordered(r.fields.iter(), state);
            }
        }
    }
}

fn hash_unordered<T: Hash, H: Hasher>(items: impl ExactSizeIterator<Item = T>, state: &mut H) {
    items.len().hash(state);
    let sum = items.fold(0u64, |acc, item| acc.wrapping_add(fingerprint(&item)));
    sum.hash(state);
}

/// Standalone hash of one value.
pub(crate) fn fingerprint<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

impl From<bool> for JsonicValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for JsonicValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for JsonicValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for JsonicValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for JsonicValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
