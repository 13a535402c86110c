mod common;

use chrono::{TimeZone, Utc};
use sensorfeed_data_formats::{Datastream, Error, Feed, SearchResult, Value};
use serde_json::json;

#[test]
fn get_and_set_reject_unknown_attributes() {
    let mut feed = common::full_feed();

    let err = feed.get("bogus").unwrap_err();
    assert!(matches!(err, Error::UnknownAttribute(ref key) if key == "bogus"));

    let err = feed
        .set("bogus", Some(Value::String("nope".to_string())))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownAttribute(_)));
}

#[test]
fn constructors_take_a_single_attribute_map() {
    assert!(matches!(
        Feed::new(&json!("nope")).unwrap_err(),
        Error::InvalidArgument(_)
    ));
    assert!(matches!(
        Datastream::new(&json!(42)).unwrap_err(),
        Error::InvalidArgument(_)
    ));
    assert!(matches!(
        SearchResult::new(&json!(["a", "b"])).unwrap_err(),
        Error::InvalidArgument(_)
    ));
}

#[test]
fn constructor_rejects_unknown_keys() {
    let err = Feed::new(&json!({"title": "ok", "bogus": "nope"})).unwrap_err();
    assert!(matches!(err, Error::UnknownAttribute(ref key) if key == "bogus"));
}

#[test]
fn attributes_follow_whitelist_order() {
    let feed = Feed::new(&json!({
        "creator": "someone",
        "id": 9,
        "title": "out of order input",
    }))
    .unwrap();

    let keys: Vec<&str> = feed.attributes().into_iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["id", "title", "creator"]);
}

#[test]
fn set_then_get_is_identity_for_whitelisted_keys() {
    let mut feed = Feed::new(&json!({})).unwrap();

    feed.set("description", Some(Value::String("solar".to_string())))
        .unwrap();
    assert_eq!(
        feed.get("description").unwrap(),
        Some(&Value::String("solar".to_string()))
    );

    feed.set("id", Some(Value::Int(99))).unwrap();
    assert_eq!(feed.get("id").unwrap(), Some(&Value::Int(99)));

    feed.set("private", Some(Value::Boolean(true))).unwrap();
    assert_eq!(feed.get("private").unwrap(), Some(&Value::Boolean(true)));
}

#[test]
fn unset_attributes_read_as_none() {
    let feed = Feed::new(&json!({"title": "sparse"})).unwrap();
    assert_eq!(feed.get("description").unwrap(), None);
    assert!(feed.datastreams().is_none());
}

#[test]
fn setting_none_clears_the_attribute() {
    let mut feed = common::full_feed();
    assert!(feed.get("title").unwrap().is_some());

    feed.set("title", None).unwrap();
    assert_eq!(feed.get("title").unwrap(), None);
}

#[test]
fn null_in_bulk_assignment_clears_the_attribute() {
    let mut feed = common::full_feed();
    let map = json!({"title": null});
    feed.set_attributes(map.as_object().unwrap()).unwrap();
    assert_eq!(feed.get("title").unwrap(), None);
}

#[test]
fn timestamp_strings_are_coerced_on_assignment() {
    let feed = Feed::new(&json!({"updated": "2024-01-01T00:00:00.000000Z"})).unwrap();
    let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(feed.updated(), Some(expected));
    assert!(matches!(
        feed.get("updated").unwrap(),
        Some(Value::Timestamp(_))
    ));
}

#[test]
fn unparseable_timestamps_are_malformed_input() {
    let err = Feed::new(&json!({"updated": "not-a-time"})).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));

    let mut datastream = common::full_datastream();
    let err = datastream
        .set("updated", Some(Value::String("yesterday-ish".to_string())))
        .unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn bulk_assignment_validates_every_key_before_applying_any() {
    let mut feed = Feed::new(&json!({})).unwrap();
    let map = json!({"title": "should not land", "bogus": "nope"});

    let err = feed.set_attributes(map.as_object().unwrap()).unwrap_err();
    assert!(matches!(err, Error::UnknownAttribute(_)));
    assert_eq!(feed.get("title").unwrap(), None);
}

#[test]
fn non_sequence_collection_assignment_is_a_silent_noop() {
    let mut feed = common::full_feed();
    feed.set("datastreams", Some(Value::String("kittens".to_string())))
        .unwrap();
    assert!(feed.datastreams().is_some(), "existing value must survive");

    let feed = Feed::new(&json!({"title": "t", "datastreams": "kittens"})).unwrap();
    assert!(feed.datastreams().is_none());
}

#[test]
fn collection_elements_are_normalized_to_entities() {
    let feed = Feed::new(&json!({
        "datastreams": [{"id": "one"}, {"id": "two"}],
    }))
    .unwrap();

    let datastreams = feed.datastreams().unwrap();
    assert_eq!(datastreams.len(), 2);
    assert_eq!(
        datastreams[0].get("id").unwrap(),
        Some(&Value::String("one".to_string()))
    );
}
