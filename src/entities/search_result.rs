use serde_json::Value as JsonValue;

use crate::entities::attributes::{AttributeBag, CollectionKind, Schema, Value};
use crate::entities::feed::Feed;
use crate::error::{Error, Result};

pub(crate) static SCHEMA: Schema = Schema {
    whitelist: SearchResult::ALLOWED_KEYS,
    timestamp_keys: &[],
    collections: &[("feeds", CollectionKind::Feeds)],
};

/// A page of feed search results.
///
/// `feeds` normalizes each assigned element to a [`Feed`]; assigning a
/// non-sequence value leaves the field unset rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    attrs: AttributeBag,
}

impl SearchResult {
    /// The fixed attribute whitelist for search results.
    pub const ALLOWED_KEYS: &'static [&'static str] =
        &["totalResults", "startIndex", "itemsPerPage", "feeds"];

    /// Create a search result from a single map of whitelisted attributes.
    pub fn new(attributes: &JsonValue) -> Result<Self> {
        let map = attributes.as_object().ok_or_else(|| {
            Error::invalid_argument("SearchResult::new takes a single attribute map")
        })?;
        let mut search_result = SearchResult {
            attrs: AttributeBag::new(&SCHEMA),
        };
        search_result.attrs.set_attributes(map)?;
        Ok(search_result)
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

    /// The matched feeds, if any have been assigned.
    pub fn feeds(&self) -> Option<&[Feed]> {
        match self.attrs.value("feeds") {
            Some(Value::Feeds(feeds)) => Some(feeds),
            _ => None,
        }
    }

    pub(crate) fn bag(&self) -> &AttributeBag {
        &self.attrs
    }
}
