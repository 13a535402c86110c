use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value as JsonValue};

use crate::entities::attributes::Value;
use crate::entities::datapoint::Datapoint;
use crate::entities::datastream::Datastream;
use crate::entities::feed::Feed;
use crate::entities::search_result::SearchResult;
use crate::error::{Error, Result};
use crate::formats::{XML_DEFAULT_VERSION, XML_LEGACY_VERSION};
use crate::parsers::{float_or_string, int_or_string, reject_unknown};

/// A parsed XML element. Namespace prefixes are kept on `name` and matched
/// through `local`, since EEML documents arrive with and without prefixes.
#[derive(Debug)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.local() == name)
    }

    fn local(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|e| Error::malformed_input(format!("invalid XML: {e}")))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| Error::malformed_input(format!("invalid XML: {e}")))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

/// Parse a document into a tree rooted at its top-level element.
fn parse_tree(document: &str) -> Result<Element> {
    let mut reader = Reader::from_str(document);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::malformed_input(format!("invalid XML: {e}")))?;
        match event {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| Error::malformed_input(format!("invalid XML: {e}")))?;
                if let Some(element) = stack.last_mut() {
                    element.text.push_str(&text);
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::malformed_input("unbalanced XML document"))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Eof => {
                return Err(Error::malformed_input("unexpected end of document"));
            }
            _ => {}
        }
    }
}

/// The document's EEML version, validated against the supported set.
fn eeml_version(root: &Element) -> Result<&str> {
    if root.local() != "eeml" {
        return Err(Error::malformed_input(format!(
            "expected an eeml root element, found {}",
            root.name
        )));
    }
    match root.attr("version") {
        Some(version @ (XML_DEFAULT_VERSION | XML_LEGACY_VERSION)) => Ok(version),
        Some(version) => Err(Error::malformed_input(format!(
            "unsupported version {version}"
        ))),
        None => Ok(XML_DEFAULT_VERSION),
    }
}

impl Feed {
    /// Parse a feed from an EEML document in either supported version shape.
    pub fn from_xml(document: &str) -> Result<Feed> {
        let root = parse_tree(document)?;
        eeml_version(&root)?;
        let environment = root
            .child("environment")
            .ok_or_else(|| Error::malformed_input("missing environment element"))?;
        feed_from_environment(environment)
    }
}

pub(crate) fn feed_from_environment(environment: &Element) -> Result<Feed> {
    let mut attrs = Map::new();
    if let Some(updated) = environment.attr("updated") {
        attrs.insert("updated".to_string(), JsonValue::from(updated));
    }
    if let Some(created) = environment.attr("created") {
        attrs.insert("created".to_string(), JsonValue::from(created));
    }
    if let Some(id) = environment.attr("id") {
        attrs.insert("id".to_string(), int_or_string(id));
    }
    if let Some(creator) = environment.attr("creator") {
        attrs.insert("creator".to_string(), JsonValue::from(creator));
    }

    let mut tags: Vec<String> = Vec::new();
    let mut datastreams: Vec<Datastream> = Vec::new();
    for child in &environment.children {
        match child.local() {
            "title" | "feed" | "status" | "description" | "icon" | "website" | "email" => {
                attrs.insert(child.local().to_string(), JsonValue::from(child.text.as_str()));
            }
            "private" => {
                let value = match child.text.as_str() {
                    "true" => JsonValue::from(true),
                    "false" => JsonValue::from(false),
                    other => JsonValue::from(other),
                };
                attrs.insert("private".to_string(), value);
            }
            "tag" => tags.push(child.text.clone()),
            // The version 5 shape nests each tag under a tags parent.
            "tags" => {
                for tag in &child.children {
                    if tag.local() == "tag" {
                        tags.push(tag.text.clone());
                    }
                }
            }
            "location" => flatten_location(child, &mut attrs),
            "data" => datastreams.push(datastream_from_data(child)?),
            _ => {}
        }
    }
    if !tags.is_empty() {
        attrs.insert("tags".to_string(), JsonValue::from(tags.join(",")));
    }

    let mut feed = Feed::new(&JsonValue::Object(attrs)).map_err(reject_unknown)?;
    if !datastreams.is_empty() {
        feed.set("datastreams", Some(Value::Datastreams(datastreams)))?;
    }
    Ok(feed)
}

fn flatten_location(location: &Element, attrs: &mut Map<String, JsonValue>) {
    for (name, key) in [
        ("domain", "location_domain"),
        ("exposure", "location_exposure"),
        ("disposition", "location_disposition"),
    ] {
        if let Some(value) = location.attr(name) {
            attrs.insert(key.to_string(), JsonValue::from(value));
        }
    }
    for child in &location.children {
        match child.local() {
            "name" => {
                attrs.insert("location_name".to_string(), JsonValue::from(child.text.as_str()));
            }
            "lat" => {
                attrs.insert("location_lat".to_string(), float_or_string(&child.text));
            }
            "lon" => {
                attrs.insert("location_lon".to_string(), float_or_string(&child.text));
            }
            "ele" => {
                attrs.insert("location_ele".to_string(), JsonValue::from(child.text.as_str()));
            }
            _ => {}
        }
    }
}

/// Build a datastream out of a `<data>` element, tolerating both version
/// shapes: the 0.5.1 `<current_value at=..>` form and the version 5
/// `<value maxValue=.. minValue=..>` form.
fn datastream_from_data(data: &Element) -> Result<Datastream> {
    let mut attrs = Map::new();
    if let Some(id) = data.attr("id") {
        attrs.insert("id".to_string(), JsonValue::from(id));
    }

    let mut tags: Vec<String> = Vec::new();
    let mut datapoints: Vec<Datapoint> = Vec::new();
    for child in &data.children {
        match child.local() {
            // Empty element text means the reading is absent, not an empty
            // string.
            "current_value" => {
                if !child.text.is_empty() {
                    attrs.insert(
                        "current_value".to_string(),
                        JsonValue::from(child.text.as_str()),
                    );
                }
                if let Some(at) = child.attr("at") {
                    attrs.insert("updated".to_string(), JsonValue::from(at));
                }
            }
            "value" => {
                if !child.text.is_empty() {
                    attrs.insert(
                        "current_value".to_string(),
                        JsonValue::from(child.text.as_str()),
                    );
                }
                if let Some(max_value) = child.attr("maxValue") {
                    attrs.insert("max_value".to_string(), JsonValue::from(max_value));
                }
                if let Some(min_value) = child.attr("minValue") {
                    attrs.insert("min_value".to_string(), JsonValue::from(min_value));
                }
            }
            "max_value" => {
                attrs.insert("max_value".to_string(), JsonValue::from(child.text.as_str()));
            }
            "min_value" => {
                attrs.insert("min_value".to_string(), JsonValue::from(child.text.as_str()));
            }
            "unit" => {
                if !child.text.is_empty() {
                    attrs.insert("unit_label".to_string(), JsonValue::from(child.text.as_str()));
                }
                if let Some(symbol) = child.attr("symbol") {
                    attrs.insert("unit_symbol".to_string(), JsonValue::from(symbol));
                }
                if let Some(unit_type) = child.attr("type") {
                    attrs.insert("unit_type".to_string(), JsonValue::from(unit_type));
                }
            }
            "tag" => tags.push(child.text.clone()),
            "tags" => {
                for tag in &child.children {
                    if tag.local() == "tag" {
                        tags.push(tag.text.clone());
                    }
                }
            }
            "datapoints" => {
                for value in &child.children {
                    if value.local() != "value" {
                        continue;
                    }
                    let mut datapoint = Map::new();
                    if let Some(at) = value.attr("at") {
                        datapoint.insert("at".to_string(), JsonValue::from(at));
                    }
                    if !value.text.is_empty() {
                        datapoint
                            .insert("value".to_string(), JsonValue::from(value.text.as_str()));
                    }
                    datapoints
                        .push(Datapoint::new(&JsonValue::Object(datapoint)).map_err(reject_unknown)?);
                }
            }
            _ => {}
        }
    }
    if !tags.is_empty() {
        attrs.insert("tags".to_string(), JsonValue::from(tags.join(",")));
    }

    let mut datastream = Datastream::new(&JsonValue::Object(attrs)).map_err(reject_unknown)?;
    if !datapoints.is_empty() {
        datastream.set("datapoints", Some(Value::Datapoints(datapoints)))?;
    }
    Ok(datastream)
}

impl Datastream {
    /// Parse a standalone datastream from an EEML document in either
    /// supported version shape.
    pub fn from_xml(document: &str) -> Result<Datastream> {
        let root = parse_tree(document)?;
        eeml_version(&root)?;
        let environment = root
            .child("environment")
            .ok_or_else(|| Error::malformed_input("missing environment element"))?;
        let data = environment
            .child("data")
            .ok_or_else(|| Error::malformed_input("missing data element"))?;

        let mut datastream = datastream_from_data(data)?;
        if let Some(feed_id) = environment.attr("id") {
            let feed_id = match feed_id.parse::<i64>() {
                Ok(number) => Value::Int(number),
                Err(_) => Value::String(feed_id.to_string()),
            };
            datastream.set("feed_id", Some(feed_id))?;
        }
        if datastream.updated().is_none() {
            if let Some(updated) = environment.attr("updated") {
                datastream.set("updated", Some(Value::String(updated.to_string())))?;
            }
        }
        Ok(datastream)
    }
}

impl Datapoint {
    /// Parse a standalone datapoint from an EEML document.
    pub fn from_xml(document: &str) -> Result<Datapoint> {
        let root = parse_tree(document)?;
        eeml_version(&root)?;
        let value = root
            .child("environment")
            .and_then(|environment| environment.child("data"))
            .and_then(|data| data.child("datapoints"))
            .and_then(|datapoints| datapoints.child("value"))
            .ok_or_else(|| Error::malformed_input("missing datapoint value element"))?;

        let mut attrs = Map::new();
        if let Some(at) = value.attr("at") {
            attrs.insert("at".to_string(), JsonValue::from(at));
        }
        if !value.text.is_empty() {
            attrs.insert("value".to_string(), JsonValue::from(value.text.as_str()));
        }
        Datapoint::new(&JsonValue::Object(attrs)).map_err(reject_unknown)
    }
}

impl SearchResult {
    /// Parse a search result from an EEML document carrying opensearch
    /// paging elements.
    pub fn from_xml(document: &str) -> Result<SearchResult> {
        let root = parse_tree(document)?;
        eeml_version(&root)?;

        let mut attrs = Map::new();
        let mut feeds: Vec<Feed> = Vec::new();
        for child in &root.children {
            match child.local() {
                "totalResults" | "startIndex" | "itemsPerPage" => {
                    attrs.insert(child.local().to_string(), int_or_string(&child.text));
                }
                "environment" => feeds.push(feed_from_environment(child)?),
                _ => {}
            }
        }

        let mut search_result =
            SearchResult::new(&JsonValue::Object(attrs)).map_err(reject_unknown)?;
        if !feeds.is_empty() {
            search_result.set("feeds", Some(Value::Feeds(feeds)))?;
        }
        Ok(search_result)
    }
}
