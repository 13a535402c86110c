mod common;

use sensorfeed_data_formats::{
    Datapoint, Datastream, Error, Feed, JSON_DEFAULT_VERSION, JSON_LEGACY_VERSION, SearchResult,
};
use serde_json::{Value as JsonValue, json};

#[test]
fn datastream_default_json_shape() {
    let generated = common::full_datastream()
        .generate_json(JSON_DEFAULT_VERSION)
        .unwrap();
    assert_eq!(
        generated,
        concat!(
            r#"{"id":"temperature","version":"1.0.0","at":"2024-01-01T00:00:00.000000Z","#,
            r#""current_value":"21.5","max_value":"29.4","min_value":"12.2","#,
            r#""tags":["humidity","temperature"],"#,
            r#""unit":{"label":"Celsius","symbol":"C","type":"derivedSI"},"#,
            r#""datapoints":[{"at":"2024-01-01T00:01:00.000000Z","value":"21.6"},"#,
            r#"{"at":"2024-01-01T00:02:00.000000Z","value":"21.7"}]}"#,
        )
    );
}

#[test]
fn datastream_legacy_json_shape() {
    let generated = common::full_datastream()
        .generate_json(JSON_LEGACY_VERSION)
        .unwrap();
    assert_eq!(
        generated,
        concat!(
            r#"{"id":"temperature","version":"0.6-alpha","#,
            r#""values":[{"recorded_at":"2024-01-01T00:00:00Z","value":"21.5","#,
            r#""max_value":"29.4","min_value":"12.2"}],"#,
            r#""tags":["humidity","temperature"],"#,
            r#""unit":{"label":"Celsius","symbol":"C","type":"derivedSI"}}"#,
        )
    );
}

#[test]
fn legacy_values_member_is_always_present() {
    let datastream = Datastream::new(&json!({"id": "bare"})).unwrap();
    let generated: JsonValue =
        serde_json::from_str(&datastream.generate_json(JSON_LEGACY_VERSION).unwrap()).unwrap();
    assert_eq!(generated["values"], json!([{}]));
}

#[test]
fn datapoint_json_shape() {
    let datapoint = Datapoint::new(&json!({
        "at": "2024-01-01T00:01:00.000000Z",
        "value": "21.6",
    }))
    .unwrap();
    assert_eq!(
        datapoint.to_json(),
        r#"{"at":"2024-01-01T00:01:00.000000Z","value":"21.6"}"#
    );
}

#[test]
fn feed_json_carries_every_member_in_order() {
    let generated = common::full_feed().to_json();
    let parsed: JsonValue = serde_json::from_str(&generated).unwrap();

    assert_eq!(parsed["id"], json!(7021));
    assert_eq!(parsed["private"], json!(false));
    assert_eq!(parsed["version"], json!("1.0.0"));
    assert_eq!(parsed["tags"], json!(["electricity", "power"]));
    assert_eq!(
        parsed["location"],
        json!({
            "disposition": "fixed",
            "domain": "physical",
            "ele": "23.0",
            "exposure": "indoor",
            "lat": 51.5235,
            "lon": -0.0807,
            "name": "up on the roof",
        })
    );
    assert_eq!(parsed["datastreams"][0]["id"], json!("temperature"));

    // Member order is part of the wire contract.
    let id = generated.find(r#""id""#).unwrap();
    let title = generated.find(r#""title""#).unwrap();
    let updated = generated.find(r#""updated""#).unwrap();
    let version = generated.find(r#""version""#).unwrap();
    let location = generated.find(r#""location""#).unwrap();
    assert!(id < title && title < updated && updated < version && version < location);
}

#[test]
fn tags_render_sorted_and_deduped_case_insensitively() {
    let datastream = Datastream::new(&json!({"tags": " Humidity, humidity , temp,b,A"})).unwrap();
    let parsed: JsonValue = serde_json::from_str(&datastream.to_json()).unwrap();
    assert_eq!(parsed["tags"], json!(["A", "b", "Humidity", "temp"]));
}

#[test]
fn unit_is_omitted_when_no_member_is_set() {
    let datastream = Datastream::new(&json!({"id": "bare"})).unwrap();
    let parsed: JsonValue = serde_json::from_str(&datastream.to_json()).unwrap();
    assert!(parsed.get("unit").is_none());
    assert!(parsed.get("datapoints").is_none());
}

#[test]
fn empty_datapoints_are_omitted() {
    let datastream = Datastream::new(&json!({"id": "bare", "datapoints": []})).unwrap();
    let parsed: JsonValue = serde_json::from_str(&datastream.to_json()).unwrap();
    assert!(parsed.get("datapoints").is_none());
}

#[test]
fn unknown_versions_generate_nothing() {
    assert!(common::full_feed().generate_json("2.0.0").is_none());
    assert!(common::full_datastream().generate_json("0.7").is_none());
    assert!(common::csv_datapoint().generate_json("0.6-alpha").is_none());
    assert!(common::search_result().generate_json("banana").is_none());
}

#[test]
fn to_json_matches_the_default_version() {
    let feed = common::full_feed();
    assert_eq!(feed.to_json(), feed.generate_json(JSON_DEFAULT_VERSION).unwrap());
}

#[test]
fn feed_round_trips_through_default_json() {
    let feed = common::full_feed();
    let parsed = Feed::from_json(&feed.to_json()).unwrap();
    assert_eq!(parsed, feed);
}

#[test]
fn datastream_round_trips_through_default_json() {
    let datastream = common::full_datastream();
    let parsed = Datastream::from_json(&datastream.to_json()).unwrap();
    assert_eq!(parsed, datastream);
}

#[test]
fn datapoint_round_trips_through_default_json() {
    let datapoint = Datapoint::new(&json!({
        "at": "2024-01-01T00:01:00.000000Z",
        "value": "21.6",
    }))
    .unwrap();
    let parsed = Datapoint::from_json(&datapoint.to_json()).unwrap();
    assert_eq!(parsed, datapoint);
}

#[test]
fn feed_round_trips_through_legacy_json() {
    // The 0.6-alpha shape cannot carry datapoints, so the fixture holds a
    // bare reading.
    let mut feed_map = common::feed_map();
    feed_map["datastreams"] = json!([]);
    let mut feed = Feed::new(&feed_map).unwrap();
    feed.set(
        "datastreams",
        Some(sensorfeed_data_formats::Value::Datastreams(vec![
            common::reading_datastream(),
        ])),
    )
    .unwrap();

    let generated = feed.generate_json(JSON_LEGACY_VERSION).unwrap();
    let parsed = Feed::from_json(&generated).unwrap();
    assert_eq!(parsed, feed);
}

#[test]
fn datastream_round_trips_through_legacy_json() {
    let datastream = common::reading_datastream();
    let generated = datastream.generate_json(JSON_LEGACY_VERSION).unwrap();
    let parsed = Datastream::from_json(&generated).unwrap();
    assert_eq!(parsed, datastream);
}

#[test]
fn search_result_round_trips_through_default_json() {
    let search_result = common::search_result();
    let parsed = SearchResult::from_json(&search_result.to_json()).unwrap();
    assert_eq!(parsed, search_result);
}

#[test]
fn invalid_json_is_malformed_input() {
    let err = Feed::from_json("{").unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn unexpected_members_are_malformed_input() {
    let err = Feed::from_json(r#"{"title": "ok", "bogus": 1}"#).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(ref msg) if msg.contains("bogus")));

    let err = Feed::from_json(r#"{"location": {"altitude": 3}}"#).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(ref msg) if msg.contains("altitude")));
}

#[test]
fn unsupported_document_versions_are_rejected() {
    let err = Feed::from_json(r#"{"title": "ok", "version": "2.0.0"}"#).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));

    // Both supported versions parse.
    assert!(Feed::from_json(r#"{"title": "ok", "version": "0.6-alpha"}"#).is_ok());
    assert!(Feed::from_json(r#"{"title": "ok", "version": "1.0.0"}"#).is_ok());
}
