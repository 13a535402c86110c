use serde_json::{Map, Value as JsonValue};

use crate::entities::datapoint::Datapoint;
use crate::entities::datastream::Datastream;
use crate::error::{Error, Result};
use crate::formats::csv::read_single_record;
use crate::parsers::{int_or_string, reject_unknown};

impl Datapoint {
    /// Parse a datapoint from a single CSV row. The column count selects
    /// the depth, mirroring the columns generation emits.
    pub fn from_csv(document: &str) -> Result<Datapoint> {
        let record = read_single_record(document)?;

        let mut attrs = Map::new();
        match record.as_slice() {
            [feed_id, datastream_id, at, value] => {
                attrs.insert("feed_id".to_string(), int_or_string(feed_id));
                attrs.insert("datastream_id".to_string(), JsonValue::from(datastream_id.as_str()));
                attrs.insert("at".to_string(), JsonValue::from(at.as_str()));
                attrs.insert("value".to_string(), JsonValue::from(value.as_str()));
            }
            [datastream_id, at, value] => {
                attrs.insert("datastream_id".to_string(), JsonValue::from(datastream_id.as_str()));
                attrs.insert("at".to_string(), JsonValue::from(at.as_str()));
                attrs.insert("value".to_string(), JsonValue::from(value.as_str()));
            }
            [at, value] => {
                attrs.insert("at".to_string(), JsonValue::from(at.as_str()));
                attrs.insert("value".to_string(), JsonValue::from(value.as_str()));
            }
            [value] => {
                attrs.insert("value".to_string(), JsonValue::from(value.as_str()));
            }
            columns => {
                return Err(Error::malformed_input(format!(
                    "expected 1 to 4 CSV columns, found {}",
                    columns.len()
                )));
            }
        }
        Datapoint::new(&JsonValue::Object(attrs)).map_err(reject_unknown)
    }
}

impl Datastream {
    /// Parse a datastream's current reading from a single CSV row. The
    /// column count selects the depth, mirroring the columns generation
    /// emits.
    pub fn from_csv(document: &str) -> Result<Datastream> {
        let record = read_single_record(document)?;

        let mut attrs = Map::new();
        match record.as_slice() {
            [feed_id, id, updated, current_value] => {
                attrs.insert("feed_id".to_string(), int_or_string(feed_id));
                attrs.insert("id".to_string(), JsonValue::from(id.as_str()));
                attrs.insert("updated".to_string(), JsonValue::from(updated.as_str()));
                attrs.insert("current_value".to_string(), JsonValue::from(current_value.as_str()));
            }
            [id, updated, current_value] => {
                attrs.insert("id".to_string(), JsonValue::from(id.as_str()));
                attrs.insert("updated".to_string(), JsonValue::from(updated.as_str()));
                attrs.insert("current_value".to_string(), JsonValue::from(current_value.as_str()));
            }
            [updated, current_value] => {
                attrs.insert("updated".to_string(), JsonValue::from(updated.as_str()));
                attrs.insert("current_value".to_string(), JsonValue::from(current_value.as_str()));
            }
            [current_value] => {
                attrs.insert("current_value".to_string(), JsonValue::from(current_value.as_str()));
            }
            columns => {
                return Err(Error::malformed_input(format!(
                    "expected 1 to 4 CSV columns, found {}",
                    columns.len()
                )));
            }
        }
        Datastream::new(&JsonValue::Object(attrs)).map_err(reject_unknown)
    }
}
