//! Versioned wire formats for sensor feed data.
//!
//! Feeds, datastreams, datapoints and search results are attribute-bag
//! entities guarded by fixed whitelists. Each entity renders to and parses
//! from the wire formats it supports: JSON (versions "1.0.0" and
//! "0.6-alpha"), EEML XML (versions "0.5.1" and "5"), and single-row CSV
//! for datapoints and datastreams.

/// Domain entities and their attribute stores.
pub mod entities;
/// Error and result types.
pub mod error;
/// Shared format plumbing: versions, timestamps, tags, XML and CSV helpers.
pub mod formats;
/// Wire documents → entities.
pub mod parsers;
/// Entities → wire documents.
pub mod templates;

pub use entities::attributes::{AttributeBag, Value};
pub use entities::datapoint::Datapoint;
pub use entities::datastream::{Datastream, Unit};
pub use entities::feed::Feed;
pub use entities::search_result::SearchResult;
pub use error::{Error, Result};
pub use formats::csv::CsvOptions;
pub use formats::{
    JSON_DEFAULT_VERSION, JSON_LEGACY_VERSION, XML_DEFAULT_VERSION, XML_LEGACY_VERSION,
};
