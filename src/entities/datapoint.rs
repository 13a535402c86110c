use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use crate::entities::attributes::{AttributeBag, Schema, Value};
use crate::error::{Error, Result};

pub(crate) static SCHEMA: Schema = Schema {
    whitelist: Datapoint::ALLOWED_KEYS,
    timestamp_keys: &["at"],
    collections: &[],
};

/// A single (timestamp, value) reading. Constructed transiently per render
/// or parse; never persisted on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Datapoint {
    attrs: AttributeBag,
}

impl Datapoint {
    /// The fixed attribute whitelist for datapoints.
    pub const ALLOWED_KEYS: &'static [&'static str] =
        &["feed_id", "datastream_id", "at", "value"];

    /// Create a datapoint from a single map of whitelisted attributes.
    pub fn new(attributes: &JsonValue) -> Result<Self> {
        let map = attributes.as_object().ok_or_else(|| {
            Error::invalid_argument("Datapoint::new takes a single attribute map")
        })?;
        let mut datapoint = Datapoint {
            attrs: AttributeBag::new(&SCHEMA),
        };
        datapoint.attrs.set_attributes(map)?;
        Ok(datapoint)
    }

    /// Read a whitelisted attribute.
    pub fn get(&self, key: &str) -> Result<Option<&Value>> {
        self.attrs.get(key)
    }

    /// Write a whitelisted attribute.
    pub fn set(&mut self, key: &str, value: Option<Value>) -> Result<()> {
        self.attrs.set(key, value)
    }

    /// Bulk-assign whitelisted attributes from plain structured data.
    pub fn set_attributes(&mut self, map: &serde_json::Map<String, JsonValue>) -> Result<()> {
        self.attrs.set_attributes(map)
    }

    /// The currently-set attributes, in whitelist order.
    pub fn attributes(&self) -> Vec<(&'static str, Value)> {
        self.attrs.attributes()
    }

    /// The reading timestamp, if set.
    pub fn at(&self) -> Option<DateTime<Utc>> {
        self.attrs.timestamp_of("at")
    }

    pub(crate) fn bag(&self) -> &AttributeBag {
        &self.attrs
    }
}
