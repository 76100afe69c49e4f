//! Generic tree for carrier XML.
//!
//! Response shapes vary between a single entry and a list of entries, and between attribute-bearing and
//! text nodes, so every document is converted into the same loose structure:
//!
//! - an element with only text becomes [`XmlValue::Text`];
//! - an element with attributes or children becomes [`XmlValue::Map`], attributes live under
//!   [`ATTRIBUTES_KEY`] as a map of text values;
//! - repeated sibling elements become one [`XmlValue::List`] under their shared name;
//! - an empty element becomes an empty map.
//!
//! Every leaf is a string. Callers read it through the accessor methods, which default to empty
//! values instead of failing.

use crate::sdk_error::SdkError;
use indexmap::IndexMap;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

pub const ATTRIBUTES_KEY: &str = "@attributes";

/// Key holding the text of an element that also has attributes but no children.
pub const TEXT_KEY: &str = "@text";

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum XmlValue {
    Text(String),
    Map(IndexMap<String, XmlValue>),
    List(Vec<XmlValue>),
}

impl Default for XmlValue {
    fn default() -> Self {
        XmlValue::Map(IndexMap::new())
    }
}

impl XmlValue {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        match self {
            XmlValue::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Follows a chain of map keys.
    pub fn path(&self, keys: &[&str]) -> Option<&XmlValue> {
        keys.iter().try_fold(self, |value, key| value.get(key))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmlValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, XmlValue>> {
        match self {
            XmlValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[XmlValue]> {
        match self {
            XmlValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Text of a child, or an empty string if it is missing or not text.
    pub fn text(&self, key: &str) -> &str {
        self.get(key).and_then(XmlValue::as_text).unwrap_or_default()
    }

    pub fn attributes(&self) -> Option<&XmlValue> {
        self.get(ATTRIBUTES_KEY)
    }

    /// Value of an attribute, or an empty string.
    pub fn attribute(&self, name: &str) -> &str {
        self.attributes()
            .map(|attributes| attributes.text(name))
            .unwrap_or_default()
    }

    /// The items of a list, or the value itself when the carrier sent a single entry.
    pub fn entries(&self) -> Vec<&XmlValue> {
        match self {
            XmlValue::List(items) => items.iter().collect(),
            value => vec![value],
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            XmlValue::Text(text) => text.is_empty(),
            XmlValue::Map(map) => map.is_empty(),
            XmlValue::List(items) => items.is_empty(),
        }
    }

    /// Moves a child out, leaving nothing behind.
    pub fn take(&mut self, key: &str) -> Option<XmlValue> {
        match self {
            XmlValue::Map(map) => map.shift_remove(key),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<String, SdkError> {
        serde_json::to_string(self).or(Err(SdkError::CouldNotSerialize))
    }
}

struct Frame {
    name: String,
    attributes: IndexMap<String, XmlValue>,
    children: IndexMap<String, XmlValue>,
    // Kept escaped until the element closes, CDATA is escaped on the way in.
    text: String,
}

impl Frame {
    fn open(start: &BytesStart) -> Result<Self, SdkError> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(SdkError::response_parse)?
            .to_string();

        let mut attributes = IndexMap::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(SdkError::response_parse)?;
            let key = std::str::from_utf8(attribute.key.as_ref()).map_err(SdkError::response_parse)?;
            let value = std::str::from_utf8(&attribute.value).map_err(SdkError::response_parse)?;
            let value = unescape(value).map_err(SdkError::response_parse)?;
            attributes.insert(key.to_string(), XmlValue::Text(value.into_owned()));
        }

        Ok(Self {
            name,
            attributes,
            children: IndexMap::new(),
            text: String::new(),
        })
    }

    fn close(self) -> Result<(String, XmlValue), SdkError> {
        let text = unescape(&self.text)
            .map_err(SdkError::response_parse)?
            .into_owned();
        let has_text = !text.trim().is_empty();

        let value = if self.attributes.is_empty() && self.children.is_empty() {
            if has_text {
                XmlValue::Text(text)
            } else {
                XmlValue::empty()
            }
        } else {
            let mut map = IndexMap::new();
            if !self.attributes.is_empty() {
                map.insert(ATTRIBUTES_KEY.to_string(), XmlValue::Map(self.attributes));
            }

            if self.children.is_empty() && has_text {
                map.insert(TEXT_KEY.to_string(), XmlValue::Text(text));
            }

            map.extend(self.children);
            XmlValue::Map(map)
        };

        Ok((self.name, value))
    }
}

fn insert_child(children: &mut IndexMap<String, XmlValue>, name: String, value: XmlValue) {
    match children.get_mut(&name) {
        Some(XmlValue::List(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::take(existing);
            *existing = XmlValue::List(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}

/// Parses a complete document and returns the value of its root element, the root's own name is dropped.
pub fn parse_document(xml: &str) -> Result<XmlValue, SdkError> {
    parse_root(xml).map(|(_, value)| value)
}

/// Parses a complete document into the name and the value of its root element.
pub fn parse_root(xml: &str) -> Result<(String, XmlValue), SdkError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, XmlValue)> = None;

    loop {
        let closed = match reader.read_event().map_err(SdkError::response_parse)? {
            Event::Start(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err(SdkError::response_parse("more than one root element"));
                }

                stack.push(Frame::open(&start)?);
                None
            }

            Event::Empty(start) => Some(Frame::open(&start)?.close()?),

            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or(SdkError::response_parse("unexpected closing tag"))?;
                Some(frame.close()?)
            }

            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame
                        .text
                        .push_str(std::str::from_utf8(&text).map_err(SdkError::response_parse)?);
                }
                None
            }

            Event::GeneralRef(reference) => {
                if let Some(frame) = stack.last_mut() {
                    let name = std::str::from_utf8(&reference).map_err(SdkError::response_parse)?;
                    frame.text.push_str(&format!("&{name};"));
                }
                None
            }

            Event::CData(cdata) => {
                if let Some(frame) = stack.last_mut() {
                    let content = std::str::from_utf8(&cdata).map_err(SdkError::response_parse)?;
                    frame.text.push_str(&escape(content));
                }
                None
            }

            Event::Eof => break,
            _ => None,
        };

        if let Some((name, value)) = closed {
            match stack.last_mut() {
                Some(parent) => insert_child(&mut parent.children, name, value),
                None if root.is_none() => root = Some((name, value)),
                None => return Err(SdkError::response_parse("more than one root element")),
            }
        }
    }

    if let Some(frame) = stack.last() {
        return Err(SdkError::response_parse(format!(
            "element {} is never closed",
            frame.name
        )));
    }

    root.ok_or(SdkError::response_parse("document has no root element"))
}
