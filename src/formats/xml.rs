use std::fmt::Write;

use crate::formats::{XML_DEFAULT_VERSION, XML_LEGACY_VERSION, sorted_tags};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const OPENSEARCH_NAMESPACE: &str = "http://a9.com/-/spec/opensearch/1.1/";
const EEML_051_NAMESPACE: &str = "http://www.eeml.org/xsd/0.5.1";
const EEML_005_NAMESPACE: &str = "http://www.eeml.org/xsd/005";

/// Indented EEML document writer. Output is deterministic for a given
/// entity and version, which backs the default-version equality contract.
pub(crate) struct XmlBuilder {
    buf: String,
    depth: usize,
}

impl XmlBuilder {
    pub(crate) fn new() -> Self {
        Self {
            buf: String::new(),
            depth: 0,
        }
    }

    pub(crate) fn declaration(&mut self) {
        self.buf.push_str(XML_DECLARATION);
        self.buf.push('\n');
    }

    pub(crate) fn open(&mut self, name: &str, attributes: &[(&str, String)]) {
        self.indent();
        let _ = write!(self.buf, "<{name}");
        self.push_attributes(attributes);
        self.buf.push_str(">\n");
        self.depth += 1;
    }

    pub(crate) fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        let _ = writeln!(self.buf, "</{name}>");
    }

    pub(crate) fn element(&mut self, name: &str, attributes: &[(&str, String)], text: &str) {
        self.indent();
        let _ = write!(self.buf, "<{name}");
        self.push_attributes(attributes);
        let _ = writeln!(self.buf, ">{}</{name}>", xml_escape(text));
    }

    pub(crate) fn empty_element(&mut self, name: &str, attributes: &[(&str, String)]) {
        self.indent();
        let _ = write!(self.buf, "<{name}");
        self.push_attributes(attributes);
        self.buf.push_str("/>\n");
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str("  ");
        }
    }

    fn push_attributes(&mut self, attributes: &[(&str, String)]) {
        for (name, value) in attributes {
            let _ = write!(self.buf, r#" {}="{}""#, name, xml_escape(value));
        }
    }
}

/// Root `<eeml>` attributes for a known version, `None` otherwise.
pub(crate) fn eeml_root_attributes(
    version: &str,
    opensearch: bool,
) -> Option<Vec<(&'static str, String)>> {
    let (namespace, schema_location) = match version {
        XML_DEFAULT_VERSION => (
            EEML_051_NAMESPACE,
            "http://www.eeml.org/xsd/0.5.1 http://www.eeml.org/xsd/0.5.1/0.5.1.xsd",
        ),
        XML_LEGACY_VERSION => (
            EEML_005_NAMESPACE,
            "http://www.eeml.org/xsd/005 http://www.eeml.org/xsd/005/005.xsd",
        ),
        _ => return None,
    };

    let mut attributes = vec![
        ("xmlns", namespace.to_string()),
        ("xmlns:xsi", XSI_NAMESPACE.to_string()),
    ];
    if opensearch {
        attributes.push(("xmlns:opensearch", OPENSEARCH_NAMESPACE.to_string()));
    }
    attributes.push(("version", version.to_string()));
    attributes.push(("xsi:schemaLocation", schema_location.to_string()));
    Some(attributes)
}

/// Write the tags section for the given version. Version 5 nests the tags
/// under a `<tags>` parent; 0.5.1 emits flat repeated `<tag>` elements.
/// A missing or empty tags attribute writes nothing.
pub(crate) fn write_tags(xml: &mut XmlBuilder, raw: Option<&str>, version: &str) {
    let Some(raw) = raw else {
        return;
    };
    let tags = sorted_tags(raw);
    if tags.is_empty() {
        return;
    }
    if version == XML_LEGACY_VERSION {
        xml.open("tags", &[]);
        for tag in &tags {
            xml.element("tag", &[], tag);
        }
        xml.close("tags");
    } else {
        for tag in &tags {
            xml.element("tag", &[], tag);
        }
    }
}

pub(crate) fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
