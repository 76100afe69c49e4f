//! SOAP plumbing for the carrier's dialect: request bodies and envelopes on the way out, permissive scanning
//! and a generic tree on the way in.

pub mod embedded;
pub mod envelope;
pub mod scanner;
pub mod tree;

pub use embedded::parse_embedded_xml;
pub use envelope::{build_request, qualified_method, wrap_envelope};
pub use tree::{ATTRIBUTES_KEY, XmlValue, parse_document};

/// Namespace prefix the carrier puts on response elements.
pub const RESPONSE_PREFIX: &str = "v1";

/// Name of the element wrapping the reply to a method, e.g. `v1:WebServService___InfEnviosResponse`.
pub fn response_element(service: &str, method: &str) -> String {
    format!("{RESPONSE_PREFIX}:{}Response", qualified_method(service, method))
}

/// Turns the content of a response element into a tree.
///
/// The fragment is a sequence of sibling elements, so it gets a synthetic root before parsing.
pub fn parse_response_fragment(fragment: &str) -> Result<XmlValue, crate::sdk_error::SdkError> {
    let clean = scanner::strip_prefix(fragment, RESPONSE_PREFIX);
    parse_document(&format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?><root>{clean}</root>"
    ))
}
