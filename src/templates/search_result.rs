use serde_json::Value as JsonValue;

use crate::entities::search_result::SearchResult;
use crate::formats::xml::{XmlBuilder, eeml_root_attributes};
use crate::formats::{JSON_DEFAULT_VERSION, JSON_LEGACY_VERSION, XML_DEFAULT_VERSION};
use crate::templates::Template;

impl SearchResult {
    /// The JSON representation for a known version, `None` otherwise.
    pub fn as_json(&self, version: &str) -> Option<JsonValue> {
        match version {
            JSON_DEFAULT_VERSION => Some(self.search_result_json(JSON_DEFAULT_VERSION)),
            JSON_LEGACY_VERSION => Some(self.search_result_json(JSON_LEGACY_VERSION)),
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

    fn search_result_json(&self, version: &'static str) -> JsonValue {
        let mut template = Template::new(self.bag());
        template.field("totalResults");
        template.field("startIndex");
        template.field("itemsPerPage");
        template.field_with("results", || {
            let feeds = self.feeds()?;
            if feeds.is_empty() {
                return None;
            }
            Some(JsonValue::Array(
                feeds.iter().filter_map(|feed| feed.as_json(version)).collect(),
            ))
        });
        template.output()
    }

    /// The EEML document for a known version, `None` otherwise. The paging
    /// triple is carried as opensearch elements on the root.
    pub fn generate_xml(&self, version: &str) -> Option<String> {
        let root = eeml_root_attributes(version, true)?;
        let mut xml = XmlBuilder::new();
        xml.declaration();
        xml.open("eeml", &root);

        for (name, key) in [
            ("opensearch:totalResults", "totalResults"),
            ("opensearch:startIndex", "startIndex"),
            ("opensearch:itemsPerPage", "itemsPerPage"),
        ] {
            if let Some(text) = self.bag().text_of(key) {
                xml.element(name, &[], &text);
            }
        }
        if let Some(feeds) = self.feeds() {
            for feed in feeds {
                feed.write_environment(&mut xml, version);
            }
        }

        xml.close("eeml");
        Some(xml.finish())
    }

    /// The default-version EEML document.
    pub fn to_xml(&self) -> String {
        self.generate_xml(XML_DEFAULT_VERSION).unwrap_or_default()
    }
}
