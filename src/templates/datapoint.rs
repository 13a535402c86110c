use serde_json::Value as JsonValue;

use crate::entities::datapoint::Datapoint;
use crate::error::Result;
use crate::formats::csv::{CsvOptions, generate_line, resolve_depth};
use crate::formats::xml::{XmlBuilder, eeml_root_attributes};
use crate::formats::{JSON_DEFAULT_VERSION, XML_DEFAULT_VERSION, iso8601_micros};
use crate::templates::{Template, timestamp_field};

impl Datapoint {
    /// The JSON representation for a known version, `None` otherwise.
    pub fn as_json(&self, version: &str) -> Option<JsonValue> {
        match version {
            JSON_DEFAULT_VERSION => {
                let mut template = Template::new(self.bag());
                template.field_with("at", || timestamp_field(self.bag(), "at"));
                template.field("value");
                Some(template.output())
            }
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

    /// The standalone EEML document for a known version, `None` otherwise.
    /// Datapoints only exist in EEML 0.5.1.
    pub fn generate_xml(&self, version: &str) -> Option<String> {
        if version != XML_DEFAULT_VERSION {
            return None;
        }
        let root = eeml_root_attributes(version, false)?;
        let mut xml = XmlBuilder::new();
        xml.declaration();
        xml.open("eeml", &root);
        xml.open("environment", &[]);
        xml.open("data", &[]);
        xml.open("datapoints", &[]);
        self.write_value(&mut xml);
        xml.close("datapoints");
        xml.close("data");
        xml.close("environment");
        xml.close("eeml");
        Some(xml.finish())
    }

    /// The default-version EEML document.
    pub fn to_xml(&self) -> String {
        self.generate_xml(XML_DEFAULT_VERSION).unwrap_or_default()
    }

    /// Write this reading's `<value>` element.
    pub(crate) fn write_value(&self, xml: &mut XmlBuilder) {
        let mut attributes: Vec<(&str, String)> = Vec::new();
        if let Some(at) = self.at() {
            attributes.push(("at", iso8601_micros(&at)));
        }
        xml.element(
            "value",
            &attributes,
            &self.bag().text_of("value").unwrap_or_default(),
        );
    }

    /// One CSV line for this reading; the column set is selected by the
    /// resolved depth.
    pub fn generate_csv(&self, options: &CsvOptions) -> Result<String> {
        let at = self
            .at()
            .map(|at| iso8601_micros(&at))
            .unwrap_or_default();
        let value = self.bag().text_of("value").unwrap_or_default();
        let fields = match resolve_depth(options) {
            4 => vec![
                self.bag().text_of("feed_id").unwrap_or_default(),
                self.bag().text_of("datastream_id").unwrap_or_default(),
                at,
                value,
            ],
            3 => vec![
                self.bag().text_of("datastream_id").unwrap_or_default(),
                at,
                value,
            ],
            2 => vec![at, value],
            _ => vec![value],
        };
        generate_line(&fields)
    }
}
