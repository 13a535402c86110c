use serde_json::{Map, Value as JsonValue};

use crate::entities::attributes::Value;
use crate::entities::datapoint::Datapoint;
use crate::entities::datastream::{Datastream, Unit};
use crate::entities::feed::Feed;
use crate::entities::search_result::SearchResult;
use crate::error::{Error, Result};
use crate::formats::{JSON_DEFAULT_VERSION, JSON_LEGACY_VERSION};
use crate::parsers::reject_unknown;

impl Feed {
    /// Parse a feed from a JSON document in either supported version shape.
    pub fn from_json(document: &str) -> Result<Feed> {
        feed_from_value(&parse_document(document)?)
    }
}

impl Datastream {
    /// Parse a datastream from a JSON document in either supported version
    /// shape.
    pub fn from_json(document: &str) -> Result<Datastream> {
        datastream_from_value(&parse_document(document)?)
    }
}

impl Datapoint {
    /// Parse a datapoint from a JSON document.
    pub fn from_json(document: &str) -> Result<Datapoint> {
        datapoint_from_value(&parse_document(document)?)
    }
}

impl SearchResult {
    /// Parse a search result from a JSON document.
    pub fn from_json(document: &str) -> Result<SearchResult> {
        let json = parse_document(document)?;
        let object = expect_object(&json, "search result")?;
        check_version(object)?;

        let mut attrs = Map::new();
        let mut feeds: Option<Vec<Feed>> = None;
        for (key, value) in object {
            match key.as_str() {
                "version" => {}
                "results" => {
                    let items = value
                        .as_array()
                        .ok_or_else(|| Error::malformed_input("results must be an array"))?;
                    feeds = Some(
                        items
                            .iter()
                            .map(feed_from_value)
                            .collect::<Result<Vec<_>>>()?,
                    );
                }
                _ => {
                    attrs.insert(key.clone(), value.clone());
                }
            }
        }

        let mut search_result =
            SearchResult::new(&JsonValue::Object(attrs)).map_err(reject_unknown)?;
        if let Some(feeds) = feeds {
            search_result.set("feeds", Some(Value::Feeds(feeds)))?;
        }
        Ok(search_result)
    }
}

fn parse_document(document: &str) -> Result<JsonValue> {
    serde_json::from_str(document)
        .map_err(|e| Error::malformed_input(format!("invalid JSON: {e}")))
}

fn expect_object<'a>(
    json: &'a JsonValue,
    entity: &str,
) -> Result<&'a Map<String, JsonValue>> {
    json.as_object()
        .ok_or_else(|| Error::malformed_input(format!("{entity} document must be an object")))
}

fn check_version(object: &Map<String, JsonValue>) -> Result<()> {
    let Some(version) = object.get("version") else {
        return Ok(());
    };
    let version = version
        .as_str()
        .ok_or_else(|| Error::malformed_input("version must be a string"))?;
    if version != JSON_DEFAULT_VERSION && version != JSON_LEGACY_VERSION {
        return Err(Error::malformed_input(format!(
            "unsupported version {version}"
        )));
    }
    Ok(())
}

fn joined_tags(value: &JsonValue) -> Result<JsonValue> {
    match value {
        JsonValue::Array(items) => {
            let tags = items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| Error::malformed_input("tags must be strings"))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(JsonValue::from(tags.join(",")))
        }
        JsonValue::String(_) => Ok(value.clone()),
        _ => Err(Error::malformed_input("tags must be an array or a string")),
    }
}

pub(crate) fn feed_from_value(json: &JsonValue) -> Result<Feed> {
    let object = expect_object(json, "feed")?;
    check_version(object)?;

    let mut attrs = Map::new();
    let mut datastreams: Option<Vec<Datastream>> = None;
    for (key, value) in object {
        match key.as_str() {
            "version" => {}
            "location" => flatten_location(value, &mut attrs)?,
            "tags" => {
                attrs.insert(key.clone(), joined_tags(value)?);
            }
            "datastreams" => {
                let items = value
                    .as_array()
                    .ok_or_else(|| Error::malformed_input("datastreams must be an array"))?;
                datastreams = Some(
                    items
                        .iter()
                        .map(datastream_from_value)
                        .collect::<Result<Vec<_>>>()?,
                );
            }
            _ => {
                attrs.insert(key.clone(), value.clone());
            }
        }
    }

    let mut feed = Feed::new(&JsonValue::Object(attrs)).map_err(reject_unknown)?;
    if let Some(datastreams) = datastreams {
        feed.set("datastreams", Some(Value::Datastreams(datastreams)))?;
    }
    Ok(feed)
}

fn flatten_location(value: &JsonValue, attrs: &mut Map<String, JsonValue>) -> Result<()> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::malformed_input("location must be an object"))?;
    for (key, value) in object {
        match key.as_str() {
            "disposition" | "domain" | "ele" | "exposure" | "lat" | "lon" | "name" => {
                attrs.insert(format!("location_{key}"), value.clone());
            }
            other => {
                return Err(Error::malformed_input(format!(
                    "unexpected location member {other}"
                )));
            }
        }
    }
    Ok(())
}

pub(crate) fn datastream_from_value(json: &JsonValue) -> Result<Datastream> {
    let object = expect_object(json, "datastream")?;
    check_version(object)?;

    let mut attrs = Map::new();
    let mut datapoints: Option<Vec<Datapoint>> = None;
    for (key, value) in object {
        match key.as_str() {
            "version" => {}
            // The 1.0.0 shape re-keys the update timestamp as `at`.
            "at" => {
                attrs.insert("updated".to_string(), value.clone());
            }
            "values" => fold_legacy_values(value, &mut attrs)?,
            "unit" => {
                let unit: Unit = serde_json::from_value(value.clone())
                    .map_err(|e| Error::malformed_input(format!("invalid unit: {e}")))?;
                if let Some(label) = unit.label {
                    attrs.insert("unit_label".to_string(), JsonValue::from(label));
                }
                if let Some(symbol) = unit.symbol {
                    attrs.insert("unit_symbol".to_string(), JsonValue::from(symbol));
                }
                if let Some(unit_type) = unit.unit_type {
                    attrs.insert("unit_type".to_string(), JsonValue::from(unit_type));
                }
            }
            "tags" => {
                attrs.insert(key.clone(), joined_tags(value)?);
            }
            "datapoints" => {
                let items = value
                    .as_array()
                    .ok_or_else(|| Error::malformed_input("datapoints must be an array"))?;
                datapoints = Some(
                    items
                        .iter()
                        .map(datapoint_from_value)
                        .collect::<Result<Vec<_>>>()?,
                );
            }
            _ => {
                attrs.insert(key.clone(), value.clone());
            }
        }
    }

    let mut datastream = Datastream::new(&JsonValue::Object(attrs)).map_err(reject_unknown)?;
    if let Some(datapoints) = datapoints {
        datastream.set("datapoints", Some(Value::Datapoints(datapoints)))?;
    }
    Ok(datastream)
}

/// Fold the 0.6-alpha `values` singleton back into the flat reading keys.
fn fold_legacy_values(value: &JsonValue, attrs: &mut Map<String, JsonValue>) -> Result<()> {
    let reading = value
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.as_object())
        .ok_or_else(|| Error::malformed_input("values must contain at least one reading"))?;

    for (member, key) in [
        ("recorded_at", "updated"),
        ("value", "current_value"),
        ("max_value", "max_value"),
        ("min_value", "min_value"),
    ] {
        if let Some(value) = reading.get(member) {
            attrs.insert(key.to_string(), value.clone());
        }
    }
    Ok(())
}

pub(crate) fn datapoint_from_value(json: &JsonValue) -> Result<Datapoint> {
    let object = expect_object(json, "datapoint")?;
    Datapoint::new(&JsonValue::Object(object.clone())).map_err(reject_unknown)
}
