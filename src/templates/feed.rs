use serde_json::{Map, Value as JsonValue};

use crate::entities::attributes::Value;
use crate::entities::feed::Feed;
use crate::formats::xml::{XmlBuilder, eeml_root_attributes, write_tags};
use crate::formats::{
    JSON_DEFAULT_VERSION, JSON_LEGACY_VERSION, XML_DEFAULT_VERSION, iso8601_micros,
};
use crate::templates::{Template, tags_array, timestamp_field};

const SCALAR_CHILDREN: [&str; 8] = [
    "title",
    "feed",
    "status",
    "description",
    "icon",
    "website",
    "email",
    "private",
];

const LOCATION_ATTRIBUTES: [(&str, &str); 3] = [
    ("domain", "location_domain"),
    ("exposure", "location_exposure"),
    ("disposition", "location_disposition"),
];

const LOCATION_CHILDREN: [(&str, &str); 4] = [
    ("name", "location_name"),
    ("lat", "location_lat"),
    ("lon", "location_lon"),
    ("ele", "location_ele"),
];

impl Feed {
    /// The JSON representation for a known version, `None` otherwise.
    pub fn as_json(&self, version: &str) -> Option<JsonValue> {
        match version {
            JSON_DEFAULT_VERSION => Some(self.feed_json(JSON_DEFAULT_VERSION)),
            JSON_LEGACY_VERSION => Some(self.feed_json(JSON_LEGACY_VERSION)),
            _ => None,
        }
    }

    /// The serialized JSON representation for a known version.
    pub fn generate_json(&self, version: &str) -> Option<String> {
        self.as_json(version).map(|json| json.to_string())
    }

    /// The default-version JSON representation.
    pub fn to_json(&self) -> String {
        self.generate_json(JSON_DEFAULT_VERSION).unwrap_or_default()
    }

    fn feed_json(&self, version: &'static str) -> JsonValue {
        let mut template = Template::new(self.bag());
        template.field("id");
        template.field("title");
        template.field("private");
        template.field("icon");
        template.field("website");
        template.field_with("tags", || tags_array(self.bag()));
        template.field("description");
        template.field("feed");
        template.field("auto_feed_url");
        template.field("status");
        template.field_with("updated", || timestamp_field(self.bag(), "updated"));
        template.field_with("created", || timestamp_field(self.bag(), "created"));
        template.field("email");
        template.field("creator");
        template.field_with("version", || Some(JsonValue::from(version)));
        template.field_with("location", || self.location_json());
        // Version propagates structurally into the nested collection.
        template.field_with("datastreams", || {
            let datastreams = self.datastreams()?;
            if datastreams.is_empty() {
                return None;
            }
            Some(JsonValue::Array(
                datastreams
                    .iter()
                    .filter_map(|datastream| datastream.as_json(version))
                    .collect(),
            ))
        });
        template.output()
    }

    fn location_json(&self) -> Option<JsonValue> {
        let mut location = Map::new();
        for (member, key) in [
            ("disposition", "location_disposition"),
            ("domain", "location_domain"),
            ("ele", "location_ele"),
            ("exposure", "location_exposure"),
            ("lat", "location_lat"),
            ("lon", "location_lon"),
            ("name", "location_name"),
        ] {
            if let Some(value) = self.bag().value(key).and_then(Value::to_scalar_json) {
                location.insert(member.to_string(), value);
            }
        }
        if location.is_empty() {
            None
        } else {
            Some(JsonValue::Object(location))
        }
    }

    /// The EEML document for a known version, `None` otherwise.
    pub fn generate_xml(&self, version: &str) -> Option<String> {
        let root = eeml_root_attributes(version, false)?;
        let mut xml = XmlBuilder::new();
        xml.declaration();
        xml.open("eeml", &root);
        self.write_environment(&mut xml, version);
        xml.close("eeml");
        Some(xml.finish())
    }

    /// The default-version EEML document.
    pub fn to_xml(&self) -> String {
        self.generate_xml(XML_DEFAULT_VERSION).unwrap_or_default()
    }

    /// Write this feed's `<environment>` element for the given version.
    pub(crate) fn write_environment(&self, xml: &mut XmlBuilder, version: &str) {
        let mut attributes: Vec<(&str, String)> = Vec::new();
        if let Some(updated) = self.updated() {
            attributes.push(("updated", iso8601_micros(&updated)));
        }
        if version == XML_DEFAULT_VERSION {
            if let Some(created) = self.created() {
                attributes.push(("created", iso8601_micros(&created)));
            }
        }
        if let Some(id) = self.bag().text_of("id") {
            attributes.push(("id", id));
        }
        if let Some(creator) = self.bag().text_of("creator") {
            attributes.push(("creator", creator));
        }
        xml.open("environment", &attributes);

        for key in SCALAR_CHILDREN {
            if let Some(text) = self.bag().text_of(key) {
                xml.element(key, &[], &text);
            }
        }
        write_tags(xml, self.bag().text_of("tags").as_deref(), version);
        self.write_location(xml);
        if let Some(datastreams) = self.datastreams() {
            for datastream in datastreams {
                datastream.write_data(xml, version);
            }
        }

        xml.close("environment");
    }

    fn write_location(&self, xml: &mut XmlBuilder) {
        let any_set = LOCATION_ATTRIBUTES
            .iter()
            .chain(LOCATION_CHILDREN.iter())
            .any(|(_, key)| self.bag().value(key).is_some());
        if !any_set {
            return;
        }

        let mut attributes: Vec<(&str, String)> = Vec::new();
        for (name, key) in LOCATION_ATTRIBUTES {
            if let Some(text) = self.bag().text_of(key) {
                attributes.push((name, text));
            }
        }
        xml.open("location", &attributes);
        for (name, key) in LOCATION_CHILDREN {
            if let Some(text) = self.bag().text_of(key) {
                xml.element(name, &[], &text);
            }
        }
        xml.close("location");
    }
}
