/// Attribute values and the whitelist-guarded attribute store.
pub mod attributes;
/// Single (timestamp, value) readings.
pub mod datapoint;
/// Streams of readings within a feed.
pub mod datastream;
/// Environment feeds.
pub mod feed;
/// Pages of feed search results.
pub mod search_result;
