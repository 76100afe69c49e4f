use super::tree::{XmlValue, parse_root};
use log::warn;

/// Unwraps a document the carrier serialized as text inside a reply field and returns its `node` child.
///
/// Absent, empty and unparseable documents all give an empty value. When the document's root is itself
/// named `node` its contents are returned.
pub fn parse_embedded_xml(xml: Option<&str>, node: &str) -> XmlValue {
    let Some(xml) = xml.filter(|xml| !xml.trim().is_empty()) else {
        return XmlValue::empty();
    };

    let (root, mut document) = match parse_root(xml) {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!("Ignoring embedded {node} document: {error}");
            return XmlValue::empty();
        }
    };

    match document.take(node) {
        Some(value) => value,
        None if root == node => document,
        None => XmlValue::empty(),
    }
}
