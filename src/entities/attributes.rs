use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use crate::entities::datapoint::Datapoint;
use crate::entities::datastream::Datastream;
use crate::entities::feed::Feed;
use crate::error::{Error, Result};
use crate::formats::{iso8601_micros, parse_timestamp};

/// An attribute value held by an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Signed 64-bit integer.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
    /// Boolean value.
    Boolean(bool),
    /// UTC timestamp.
    Timestamp(DateTime<Utc>),
    /// Nested datastream collection.
    Datastreams(Vec<Datastream>),
    /// Nested datapoint collection.
    Datapoints(Vec<Datapoint>),
    /// Nested feed collection.
    Feeds(Vec<Feed>),
}

impl Value {
    /// Borrow the value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    /// Read the value as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(number) => Some(*number),
            _ => None,
        }
    }

    /// Read the value as a timestamp, if it is one.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(timestamp) => Some(*timestamp),
            _ => None,
        }
    }

    /// Project a scalar onto JSON. Collections render through their own
    /// version routines, never through this path.
    pub(crate) fn to_scalar_json(&self) -> Option<JsonValue> {
        match self {
            Value::Int(number) => Some(JsonValue::from(*number)),
            Value::Float(number) => Some(JsonValue::from(*number)),
            Value::String(text) => Some(JsonValue::from(text.as_str())),
            Value::Boolean(flag) => Some(JsonValue::from(*flag)),
            Value::Timestamp(timestamp) => Some(JsonValue::from(iso8601_micros(timestamp))),
            _ => None,
        }
    }

    /// Project a scalar onto plain text for XML element content and CSV
    /// columns. Timestamps use the 6-digit wire precision.
    pub(crate) fn to_text(&self) -> Option<String> {
        match self {
            Value::Int(number) => Some(number.to_string()),
            Value::Float(number) => Some(number.to_string()),
            Value::String(text) => Some(text.clone()),
            Value::Boolean(flag) => Some(flag.to_string()),
            Value::Timestamp(timestamp) => Some(iso8601_micros(timestamp)),
            _ => None,
        }
    }
}

/// Element type of a nested entity collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum CollectionKind {
    Feeds,
    Datastreams,
    Datapoints,
}

/// Fixed, type-level attribute schema: the whitelist plus the keys that
/// carry timestamps or nested collections. Immutable and version-independent.
#[derive(Debug, PartialEq)]
pub(crate) struct Schema {
    pub whitelist: &'static [&'static str],
    pub timestamp_keys: &'static [&'static str],
    pub collections: &'static [(&'static str, CollectionKind)],
}

impl Schema {
    fn collection_kind(&self, key: &str) -> Option<CollectionKind> {
        self.collections
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, kind)| *kind)
    }

    fn is_timestamp(&self, key: &str) -> bool {
        self.timestamp_keys.contains(&key)
    }
}

/// Whitelist-guarded attribute store. Get and set succeed only for keys in
/// the whitelist; everything else fails with `UnknownAttribute`. Unset keys
/// are absent, never null-valued.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBag {
    schema: &'static Schema,
    values: HashMap<&'static str, Value>,
}

impl AttributeBag {
    pub(crate) fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            values: HashMap::new(),
        }
    }

    fn resolve(&self, key: &str) -> Result<&'static str> {
        self.schema
            .whitelist
            .iter()
            .copied()
            .find(|allowed| *allowed == key)
            .ok_or_else(|| Error::unknown_attribute(key))
    }

    /// Read a whitelisted attribute. Unset keys read as `None`.
    pub fn get(&self, key: &str) -> Result<Option<&Value>> {
        let key = self.resolve(key)?;
        Ok(self.values.get(key))
    }

    /// Write a whitelisted attribute. `None` clears the slot. Timestamp
    /// keys coerce string input; collection keys silently ignore values of
    /// the wrong shape (the slot is left unset).
    pub fn set(&mut self, key: &str, value: Option<Value>) -> Result<()> {
        let key = self.resolve(key)?;
        let Some(value) = value else {
            self.values.remove(key);
            return Ok(());
        };

        if let Some(kind) = self.schema.collection_kind(key) {
            if !matches_kind(&value, kind) {
                log::warn!("ignoring non-sequence assignment to collection attribute {key}");
                return Ok(());
            }
            self.values.insert(key, value);
            return Ok(());
        }

        let value = if self.schema.is_timestamp(key) {
            coerce_timestamp(value)?
        } else {
            value
        };
        self.values.insert(key, value);
        Ok(())
    }

    /// Write a whitelisted attribute from plain structured data. Collection
    /// keys accept an array of attribute maps, normalized element by
    /// element; a non-sequence leaves the slot unset.
    pub fn set_json(&mut self, key: &str, value: &JsonValue) -> Result<()> {
        let key = self.resolve(key)?;
        if value.is_null() {
            self.values.remove(key);
            return Ok(());
        }

        if let Some(kind) = self.schema.collection_kind(key) {
            match value.as_array() {
                Some(items) => {
                    let collection = collection_from_json(items, kind)?;
                    self.values.insert(key, collection);
                }
                None => {
                    log::warn!("ignoring non-sequence assignment to collection attribute {key}");
                }
            }
            return Ok(());
        }

        let Some(scalar) = scalar_from_json(value) else {
            return Err(Error::malformed_input(format!(
                "attribute {key} must be a scalar"
            )));
        };
        let scalar = if self.schema.is_timestamp(key) {
            coerce_timestamp(scalar)?
        } else {
            scalar
        };
        self.values.insert(key, scalar);
        Ok(())
    }

    /// Bulk assignment. Keys are applied in whitelist order regardless of
    /// input order; any non-whitelisted key fails, matching direct `set`.
    pub fn set_attributes(&mut self, map: &serde_json::Map<String, JsonValue>) -> Result<()> {
        for key in map.keys() {
            self.resolve(key)?;
        }
        for key in self.schema.whitelist {
            if let Some(value) = map.get(*key) {
                self.set_json(key, value)?;
            }
        }
        Ok(())
    }

    /// The currently-set attributes, in whitelist order. Never includes a
    /// key whose value is unset.
    pub fn attributes(&self) -> Vec<(&'static str, Value)> {
        self.schema
            .whitelist
            .iter()
            .filter_map(|key| self.values.get(key).map(|value| (*key, value.clone())))
            .collect()
    }

    /// Unchecked read used by the version routines, which only name
    /// whitelisted keys.
    pub(crate) fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub(crate) fn text_of(&self, key: &str) -> Option<String> {
        self.value(key).and_then(Value::to_text)
    }

    pub(crate) fn timestamp_of(&self, key: &str) -> Option<DateTime<Utc>> {
        self.value(key).and_then(Value::as_timestamp)
    }
}

fn coerce_timestamp(value: Value) -> Result<Value> {
    match value {
        Value::String(text) => parse_timestamp(&text).map(Value::Timestamp),
        other => Ok(other),
    }
}

fn matches_kind(value: &Value, kind: CollectionKind) -> bool {
    matches!(
        (value, kind),
        (Value::Feeds(_), CollectionKind::Feeds)
            | (Value::Datastreams(_), CollectionKind::Datastreams)
            | (Value::Datapoints(_), CollectionKind::Datapoints)
    )
}

fn collection_from_json(items: &[JsonValue], kind: CollectionKind) -> Result<Value> {
    match kind {
        CollectionKind::Feeds => items
            .iter()
            .map(Feed::new)
            .collect::<Result<Vec<_>>>()
            .map(Value::Feeds),
        CollectionKind::Datastreams => items
            .iter()
            .map(Datastream::new)
            .collect::<Result<Vec<_>>>()
            .map(Value::Datastreams),
        CollectionKind::Datapoints => items
            .iter()
            .map(Datapoint::new)
            .collect::<Result<Vec<_>>>()
            .map(Value::Datapoints),
    }
}

/// Convert a structured-data scalar into an attribute value.
pub(crate) fn scalar_from_json(value: &JsonValue) -> Option<Value> {
    if let Some(number) = value.as_i64() {
        return Some(Value::Int(number));
    }
    if let Some(number) = value.as_u64() {
        return Some(match i64::try_from(number) {
            Ok(as_i64) => Value::Int(as_i64),
            Err(_) => Value::Float(number as f64),
        });
    }
    if let Some(number) = value.as_f64() {
        return Some(Value::Float(number));
    }
    if let Some(text) = value.as_str() {
        return Some(Value::String(text.to_string()));
    }
    if let Some(flag) = value.as_bool() {
        return Some(Value::Boolean(flag));
    }
    None
}
