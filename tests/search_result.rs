mod common;

use sensorfeed_data_formats::{Error, SearchResult, Value};
use serde_json::{Value as JsonValue, json};

#[test]
fn allowed_keys_cover_the_paging_triple_and_feeds() {
    assert_eq!(
        SearchResult::ALLOWED_KEYS,
        &["totalResults", "startIndex", "itemsPerPage", "feeds"]
    );
}

#[test]
fn constructor_takes_a_single_attribute_map() {
    assert!(matches!(
        SearchResult::new(&json!(42)).unwrap_err(),
        Error::InvalidArgument(_)
    ));
}

#[test]
fn unknown_attributes_are_rejected() {
    let err = SearchResult::new(&json!({"totalResults": 1, "pageSize": 10})).unwrap_err();
    assert!(matches!(err, Error::UnknownAttribute(ref key) if key == "pageSize"));
}

#[test]
fn feeds_are_normalized_to_feed_entities() {
    let search_result = SearchResult::new(&json!({
        "totalResults": 2,
        "feeds": [{"title": "one"}, {"title": "two"}],
    }))
    .unwrap();

    let feeds = search_result.feeds().unwrap();
    assert_eq!(feeds.len(), 2);
    assert_eq!(
        feeds[1].get("title").unwrap(),
        Some(&Value::String("two".to_string()))
    );
}

#[test]
fn non_sequence_feeds_assignment_is_a_silent_noop() {
    let search_result = SearchResult::new(&json!({"feeds": "kittens"})).unwrap();
    assert!(search_result.feeds().is_none());

    let mut search_result = common::search_result();
    search_result
        .set("feeds", Some(Value::String("kittens".to_string())))
        .unwrap();
    assert!(search_result.feeds().is_some(), "existing feeds must survive");
}

#[test]
fn empty_feeds_render_as_an_absent_results_member() {
    let search_result = SearchResult::new(&json!({"totalResults": 0, "feeds": []})).unwrap();
    let parsed: JsonValue = serde_json::from_str(&search_result.to_json()).unwrap();
    assert_eq!(parsed, json!({"totalResults": 0}));
}

#[test]
fn unset_members_are_excluded_from_output() {
    let search_result = SearchResult::new(&json!({"totalResults": 9})).unwrap();
    let parsed: JsonValue = serde_json::from_str(&search_result.to_json()).unwrap();

    assert_eq!(parsed, json!({"totalResults": 9}));
}

#[test]
fn paging_members_render_in_contract_order() {
    let generated = common::search_result().to_json();
    let total = generated.find("totalResults").unwrap();
    let start = generated.find("startIndex").unwrap();
    let per_page = generated.find("itemsPerPage").unwrap();
    let results = generated.find("results").unwrap();
    assert!(total < start && start < per_page && per_page < results);
}
