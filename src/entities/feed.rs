use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use crate::entities::attributes::{AttributeBag, CollectionKind, Schema, Value};
use crate::entities::datastream::Datastream;
use crate::error::{Error, Result};

pub(crate) static SCHEMA: Schema = Schema {
    whitelist: Feed::ALLOWED_KEYS,
    timestamp_keys: &["updated", "created"],
    collections: &[("datastreams", CollectionKind::Datastreams)],
};

/// An environment feed: metadata, location and a collection of datastreams.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    attrs: AttributeBag,
}

impl Feed {
    /// The fixed attribute whitelist for feeds.
    pub const ALLOWED_KEYS: &'static [&'static str] = &[
        "id",
        "title",
        "private",
        "icon",
        "website",
        "tags",
        "description",
        "feed",
        "auto_feed_url",
        "status",
        "updated",
        "created",
        "email",
        "creator",
        "location_disposition",
        "location_domain",
        "location_ele",
        "location_exposure",
        "location_lat",
        "location_lon",
        "location_name",
        "datastreams",
    ];

    /// Create a feed from a single map of whitelisted attributes.
    pub fn new(attributes: &JsonValue) -> Result<Self> {
        let map = attributes
            .as_object()
            .ok_or_else(|| Error::invalid_argument("Feed::new takes a single attribute map"))?;
        let mut feed = Feed {
            attrs: AttributeBag::new(&SCHEMA),
        };
        feed.attrs.set_attributes(map)?;
        Ok(feed)
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

    /// The nested datastreams, if any have been assigned.
    pub fn datastreams(&self) -> Option<&[Datastream]> {
        match self.attrs.value("datastreams") {
            Some(Value::Datastreams(datastreams)) => Some(datastreams),
            _ => None,
        }
    }

    /// The update timestamp, if set.
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.attrs.timestamp_of("updated")
    }

    /// The creation timestamp, if set.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.attrs.timestamp_of("created")
    }

    pub(crate) fn bag(&self) -> &AttributeBag {
        &self.attrs
    }
}
