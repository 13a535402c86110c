use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::entities::attributes::{AttributeBag, CollectionKind, Schema, Value};
use crate::entities::datapoint::Datapoint;
use crate::error::{Error, Result};

pub(crate) static SCHEMA: Schema = Schema {
    whitelist: Datastream::ALLOWED_KEYS,
    timestamp_keys: &["updated"],
    collections: &[("datapoints", CollectionKind::Datapoints)],
};

/// The label/symbol/type triple describing a datastream's unit, present in
/// a representation only when at least one member is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Unit {
    /// Human-readable unit name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Unit symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Unit classification.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<String>,
}

/// A single stream of readings within a feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Datastream {
    attrs: AttributeBag,
}

impl Datastream {
    /// The fixed attribute whitelist for datastreams.
    pub const ALLOWED_KEYS: &'static [&'static str] = &[
        "id",
        "feed_id",
        "feed_creator",
        "current_value",
        "max_value",
        "min_value",
        "tags",
        "unit_label",
        "unit_symbol",
        "unit_type",
        "updated",
        "datapoints",
    ];

    /// Create a datastream from a single map of whitelisted attributes.
    pub fn new(attributes: &JsonValue) -> Result<Self> {
        let map = attributes.as_object().ok_or_else(|| {
            Error::invalid_argument("Datastream::new takes a single attribute map")
        })?;
        let mut datastream = Datastream {
            attrs: AttributeBag::new(&SCHEMA),
        };
        datastream.attrs.set_attributes(map)?;
        Ok(datastream)
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

    /// The nested datapoints, if any have been assigned.
    pub fn datapoints(&self) -> Option<&[Datapoint]> {
        match self.attrs.value("datapoints") {
            Some(Value::Datapoints(datapoints)) => Some(datapoints),
            _ => None,
        }
    }

    /// The update timestamp, if set.
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.attrs.timestamp_of("updated")
    }

    /// The unit triple, if any of its members is set.
    pub fn unit(&self) -> Option<Unit> {
        let unit = Unit {
            label: self.attrs.text_of("unit_label"),
            symbol: self.attrs.text_of("unit_symbol"),
            unit_type: self.attrs.text_of("unit_type"),
        };
        if unit.label.is_none() && unit.symbol.is_none() && unit.unit_type.is_none() {
            None
        } else {
            Some(unit)
        }
    }

    pub(crate) fn bag(&self) -> &AttributeBag {
        &self.attrs
    }
}
