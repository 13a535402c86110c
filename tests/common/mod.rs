#![allow(dead_code)]

use sensorfeed_data_formats::{Datapoint, Datastream, Feed, SearchResult};
use serde_json::{Value as JsonValue, json};

pub fn datastream_map() -> JsonValue {
    json!({
        "id": "temperature",
        "current_value": "21.5",
        "max_value": "29.4",
        "min_value": "12.2",
        "tags": "humidity,temperature",
        "unit_label": "Celsius",
        "unit_symbol": "C",
        "unit_type": "derivedSI",
        "updated": "2024-01-01T00:00:00.000000Z",
        "datapoints": [
            {"at": "2024-01-01T00:01:00.000000Z", "value": "21.6"},
            {"at": "2024-01-01T00:02:00.000000Z", "value": "21.7"},
        ],
    })
}

pub fn full_datastream() -> Datastream {
    Datastream::new(&datastream_map()).unwrap()
}

/// A datastream holding only what the 0.6-alpha shape can carry, so legacy
/// round trips compare equal.
pub fn reading_datastream() -> Datastream {
    Datastream::new(&json!({
        "id": "temperature",
        "current_value": "21.5",
        "max_value": "29.4",
        "min_value": "12.2",
        "tags": "humidity,temperature",
        "unit_label": "Celsius",
        "unit_symbol": "C",
        "unit_type": "derivedSI",
        "updated": "2024-01-01T00:00:00.000000Z",
    }))
    .unwrap()
}

pub fn feed_map() -> JsonValue {
    json!({
        "id": 7021,
        "title": "Cottage Electricity",
        "private": false,
        "icon": "http://example.com/icon.png",
        "website": "http://example.com",
        "tags": "electricity,power",
        "description": "Mains monitoring",
        "feed": "http://example.com/feeds/7021.json",
        "status": "live",
        "updated": "2024-01-01T00:00:00.000000Z",
        "created": "2023-06-15T12:30:00.000000Z",
        "email": "owner@example.com",
        "creator": "http://example.com/users/owner",
        "location_disposition": "fixed",
        "location_domain": "physical",
        "location_ele": "23.0",
        "location_exposure": "indoor",
        "location_lat": 51.5235,
        "location_lon": -0.0807,
        "location_name": "up on the roof",
        "datastreams": [datastream_map()],
    })
}

pub fn full_feed() -> Feed {
    Feed::new(&feed_map()).unwrap()
}

pub fn search_result() -> SearchResult {
    SearchResult::new(&json!({
        "totalResults": 100,
        "startIndex": 0,
        "itemsPerPage": 50,
        "feeds": [feed_map()],
    }))
    .unwrap()
}

pub fn csv_datapoint() -> Datapoint {
    Datapoint::new(&json!({
        "feed_id": 12,
        "datastream_id": "temp",
        "at": "2024-01-01T00:00:00.000000Z",
        "value": "21.5",
    }))
    .unwrap()
}

pub fn csv_datastream() -> Datastream {
    Datastream::new(&json!({
        "feed_id": 12,
        "id": "temp",
        "updated": "2024-01-01T00:00:00.000000Z",
        "current_value": "21.5",
    }))
    .unwrap()
}
