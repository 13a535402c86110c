/// Datapoint version routines.
pub mod datapoint;
/// Datastream version routines.
pub mod datastream;
/// Feed version routines.
pub mod feed;
/// Search result version routines.
pub mod search_result;

use serde_json::{Map, Value as JsonValue};

use crate::entities::attributes::{AttributeBag, Value};
use crate::formats::{iso8601_micros, sorted_tags};

/// Field source recorded by a [`Template`]: either a direct attribute read
/// or a deferred computation. Both are evaluated at output time, not at
/// registration time.
enum FieldSource<'a> {
    Attribute(&'static str),
    Computed(Box<dyn FnOnce() -> Option<JsonValue> + 'a>),
}

/// Write-once ordered field accumulator bound to one subject entity.
///
/// Fields are rendered in recording order; nil/absent values are skipped.
/// The recording order is part of the wire contract for each version.
pub struct Template<'a> {
    subject: &'a AttributeBag,
    fields: Vec<(&'static str, FieldSource<'a>)>,
}

impl<'a> Template<'a> {
    pub(crate) fn new(subject: &'a AttributeBag) -> Self {
        Self {
            subject,
            fields: Vec::new(),
        }
    }

    /// Record a field read from the subject's attribute of the same name.
    pub(crate) fn field(&mut self, name: &'static str) {
        self.fields.push((name, FieldSource::Attribute(name)));
    }

    /// Record a field whose value comes from a deferred computation.
    pub(crate) fn field_with<F>(&mut self, name: &'static str, compute: F)
    where
        F: FnOnce() -> Option<JsonValue> + 'a,
    {
        self.fields
            .push((name, FieldSource::Computed(Box::new(compute))));
    }

    /// Render the recorded fields, in recording order, as one JSON object.
    pub(crate) fn output(self) -> JsonValue {
        let Template { subject, fields } = self;
        let mut object = Map::new();
        for (name, source) in fields {
            let value = match source {
                FieldSource::Attribute(key) => {
                    subject.value(key).and_then(Value::to_scalar_json)
                }
                FieldSource::Computed(compute) => compute(),
            };
            if let Some(value) = value {
                object.insert(name.to_string(), value);
            }
        }
        JsonValue::Object(object)
    }
}

/// The subject's tags as a rendered JSON array, absent when tags are unset.
pub(crate) fn tags_array(bag: &AttributeBag) -> Option<JsonValue> {
    let raw = bag.value("tags")?.as_str()?;
    Some(JsonValue::Array(
        sorted_tags(raw).into_iter().map(JsonValue::from).collect(),
    ))
}

/// A timestamp attribute at 6-digit wire precision, absent when unset.
pub(crate) fn timestamp_field(bag: &AttributeBag, key: &str) -> Option<JsonValue> {
    bag.timestamp_of(key)
        .map(|timestamp| JsonValue::from(iso8601_micros(&timestamp)))
}
