use serde_json::{Map, Value as JsonValue};

use crate::entities::attributes::Value;
use crate::entities::datastream::Datastream;
use crate::error::Result;
use crate::formats::csv::{CsvOptions, generate_line, resolve_depth};
use crate::formats::xml::{XmlBuilder, eeml_root_attributes, write_tags};
use crate::formats::{
    JSON_DEFAULT_VERSION, JSON_LEGACY_VERSION, XML_DEFAULT_VERSION, XML_LEGACY_VERSION,
    iso8601_micros, iso8601_seconds,
};
use crate::templates::{Template, tags_array, timestamp_field};

impl Datastream {
    /// The JSON representation for a known version, `None` otherwise.
    pub fn as_json(&self, version: &str) -> Option<JsonValue> {
        match version {
            JSON_DEFAULT_VERSION => Some(self.json_1_0_0()),
            JSON_LEGACY_VERSION => Some(self.json_0_6_alpha()),
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

    fn json_1_0_0(&self) -> JsonValue {
        let mut template = Template::new(self.bag());
        template.field("id");
        template.field_with("version", || Some(JsonValue::from(JSON_DEFAULT_VERSION)));
        template.field_with("at", || timestamp_field(self.bag(), "updated"));
        template.field("current_value");
        template.field("max_value");
        template.field("min_value");
        template.field_with("tags", || tags_array(self.bag()));
        template.field_with("unit", || self.unit_json());
        template.field_with("datapoints", || {
            let datapoints = self.datapoints()?;
            if datapoints.is_empty() {
                return None;
            }
            Some(JsonValue::Array(
                datapoints
                    .iter()
                    .filter_map(|datapoint| datapoint.as_json(JSON_DEFAULT_VERSION))
                    .collect(),
            ))
        });
        template.output()
    }

    fn json_0_6_alpha(&self) -> JsonValue {
        let mut template = Template::new(self.bag());
        template.field("id");
        template.field_with("version", || Some(JsonValue::from(JSON_LEGACY_VERSION)));
        // The 0.6-alpha contract requires values to be present as a
        // singleton array even when the reading is empty.
        template.field_with("values", || {
            let mut reading = Map::new();
            if let Some(updated) = self.updated() {
                reading.insert(
                    "recorded_at".to_string(),
                    JsonValue::from(iso8601_seconds(&updated)),
                );
            }
            for (member, key) in [
                ("value", "current_value"),
                ("max_value", "max_value"),
                ("min_value", "min_value"),
            ] {
                if let Some(value) = self.bag().value(key).and_then(Value::to_scalar_json) {
                    reading.insert(member.to_string(), value);
                }
            }
            Some(JsonValue::Array(vec![JsonValue::Object(reading)]))
        });
        template.field_with("tags", || tags_array(self.bag()));
        template.field_with("unit", || self.unit_json());
        template.output()
    }

    fn unit_json(&self) -> Option<JsonValue> {
        self.unit().and_then(|unit| serde_json::to_value(unit).ok())
    }

    /// The standalone EEML document for a known version, `None` otherwise.
    pub fn generate_xml(&self, version: &str) -> Option<String> {
        let root = eeml_root_attributes(version, false)?;
        let mut xml = XmlBuilder::new();
        xml.declaration();
        xml.open("eeml", &root);

        let mut environment: Vec<(&str, String)> = Vec::new();
        if version == XML_DEFAULT_VERSION {
            if let Some(updated) = self.updated() {
                environment.push(("updated", iso8601_micros(&updated)));
            }
        }
        if let Some(feed_id) = self.bag().text_of("feed_id") {
            environment.push(("id", feed_id));
        }
        xml.open("environment", &environment);
        self.write_data(&mut xml, version);
        xml.close("environment");

        xml.close("eeml");
        Some(xml.finish())
    }

    /// The default-version EEML document.
    pub fn to_xml(&self) -> String {
        self.generate_xml(XML_DEFAULT_VERSION).unwrap_or_default()
    }

    /// Write this datastream's `<data>` element for the given version.
    pub(crate) fn write_data(&self, xml: &mut XmlBuilder, version: &str) {
        let mut attributes: Vec<(&str, String)> = Vec::new();
        if let Some(id) = self.bag().text_of("id") {
            attributes.push(("id", id));
        }
        xml.open("data", &attributes);

        write_tags(xml, self.bag().text_of("tags").as_deref(), version);

        let current_value = self.bag().text_of("current_value");
        let max_value = self.bag().text_of("max_value");
        let min_value = self.bag().text_of("min_value");

        if version == XML_LEGACY_VERSION {
            if current_value.is_some() || max_value.is_some() || min_value.is_some() {
                let mut value_attributes: Vec<(&str, String)> = Vec::new();
                if let Some(max_value) = max_value {
                    value_attributes.push(("maxValue", max_value));
                }
                if let Some(min_value) = min_value {
                    value_attributes.push(("minValue", min_value));
                }
                xml.element(
                    "value",
                    &value_attributes,
                    &current_value.unwrap_or_default(),
                );
            }
            self.write_unit(xml);
        } else {
            if current_value.is_some() || self.updated().is_some() {
                let mut value_attributes: Vec<(&str, String)> = Vec::new();
                if let Some(updated) = self.updated() {
                    value_attributes.push(("at", iso8601_micros(&updated)));
                }
                xml.element(
                    "current_value",
                    &value_attributes,
                    &current_value.unwrap_or_default(),
                );
            }
            if let Some(max_value) = max_value {
                xml.element("max_value", &[], &max_value);
            }
            if let Some(min_value) = min_value {
                xml.element("min_value", &[], &min_value);
            }
            self.write_unit(xml);
            if let Some(datapoints) = self.datapoints() {
                if !datapoints.is_empty() {
                    xml.open("datapoints", &[]);
                    for datapoint in datapoints {
                        datapoint.write_value(xml);
                    }
                    xml.close("datapoints");
                }
            }
        }

        xml.close("data");
    }

    /// One CSV line for this datastream's current reading; the column set
    /// is selected by the resolved depth.
    pub fn generate_csv(&self, options: &CsvOptions) -> Result<String> {
        let updated = self
            .updated()
            .map(|updated| iso8601_micros(&updated))
            .unwrap_or_default();
        let current_value = self.bag().text_of("current_value").unwrap_or_default();
        let fields = match resolve_depth(options) {
            4 => vec![
                self.bag().text_of("feed_id").unwrap_or_default(),
                self.bag().text_of("id").unwrap_or_default(),
                updated,
                current_value,
            ],
            3 => vec![
                self.bag().text_of("id").unwrap_or_default(),
                updated,
                current_value,
            ],
            2 => vec![updated, current_value],
            _ => vec![current_value],
        };
        generate_line(&fields)
    }

    fn write_unit(&self, xml: &mut XmlBuilder) {
        let Some(unit) = self.unit() else {
            return;
        };
        let mut attributes: Vec<(&str, String)> = Vec::new();
        if let Some(symbol) = unit.symbol {
            attributes.push(("symbol", symbol));
        }
        if let Some(unit_type) = unit.unit_type {
            attributes.push(("type", unit_type));
        }
        match unit.label {
            Some(label) => xml.element("unit", &attributes, &label),
            None => xml.empty_element("unit", &attributes),
        }
    }
}
