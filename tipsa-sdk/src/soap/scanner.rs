//! Permissive scanning of raw carrier replies.
//!
//! Replies are not always well-formed as a whole, so nothing here parses a complete document. The scanner
//! walks the event stream until it finds what it is looking for. Closing tag names are not checked against
//! their openers, lone `&` characters are kept as text and HTML named entities are decoded. When the
//! reader hits a syntax error it falls back to plain text search on the raw reply.
//!
//! Edge cases:
//! - content may span several lines;
//! - an element nested inside another element of the same name is skipped as a whole, the outer
//!   element's content is returned;
//! - an element written as `<name/>` has empty content.

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::Event;

/// Fault markers of the two SOAP stacks the carrier runs behind.
pub const FAULT_MARKERS: [&str; 2] = ["<SOAP-ENV:Fault>", "<soap:Fault>"];

const FAULT_STRING: &str = "faultstring";

fn permissive_reader(raw: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(raw);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_dangling_amp = true;
    reader
}

fn position(reader: &Reader<&[u8]>, raw: &str) -> usize {
    usize::try_from(reader.buffer_position())
        .unwrap_or(raw.len())
        .min(raw.len())
}

/// Text between `offset` and the first `</name>` after it.
fn content_until_close<'a>(raw: &'a str, offset: usize, name: &str) -> Option<&'a str> {
    let rest = raw.get(offset..)?;
    let end = rest.find(&format!("</{name}>"))?;
    Some(&rest[..end])
}

/// Text between the first `<name>` and the `</name>` after it, found without parsing.
fn search_content<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    let open = format!("<{name}>");
    let start = raw.find(&open)? + open.len();
    content_until_close(raw, start, name)
}

/// Decodes character and entity references, XML and HTML named ones alike. A `&` that does not start a
/// known reference is kept as is.
pub fn decode_text(text: &str) -> String {
    if let Ok(decoded) = unescape(text) {
        return decoded.into_owned();
    }

    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let reference = rest
            .find(';')
            .map(|semicolon| &rest[..=semicolon])
            .and_then(|reference| unescape(reference).ok().map(|value| (reference.len(), value)));

        match reference {
            Some((length, value)) => {
                decoded.push_str(&value);
                rest = &rest[length..];
            }
            None => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }
    decoded.push_str(rest);

    decoded
}

pub fn is_fault(raw: &str) -> bool {
    FAULT_MARKERS.iter().any(|marker| raw.contains(marker))
}

/// Decoded text of the first `faultstring` element.
pub fn fault_string(raw: &str) -> Option<String> {
    let mut reader = permissive_reader(raw);

    let content = loop {
        match reader.read_event() {
            Ok(Event::Start(start)) if start.name().as_ref() == FAULT_STRING.as_bytes() => {
                break content_until_close(raw, position(&reader, raw), FAULT_STRING);
            }

            Ok(Event::Eof) => break None,
            Err(_) => break search_content(raw, FAULT_STRING),
            Ok(_) => (),
        }
    };

    content.map(decode_text)
}

/// Raw inner content of the first element named exactly `name`, markup included.
pub fn element_content(raw: &str, name: &str) -> Option<String> {
    let mut reader = permissive_reader(raw);

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) if start.name().as_ref() == name.as_bytes() => {
                let offset = position(&reader, raw);
                let end = start.to_end().into_owned();
                return match reader.read_text(end.name()) {
                    Ok(content) => Some(content.into_owned()),
                    Err(_) => content_until_close(raw, offset, name).map(str::to_string),
                };
            }

            Ok(Event::Empty(start)) if start.name().as_ref() == name.as_bytes() => {
                return Some(String::new());
            }

            Ok(Event::Eof) => return None,
            Err(_) => return search_content(raw, name).map(str::to_string),
            Ok(_) => (),
        }
    }
}

/// Drops a namespace prefix from every opening and closing tag, attributes are left alone.
pub fn strip_prefix(fragment: &str, prefix: &str) -> String {
    fragment
        .replace(&format!("</{prefix}:"), "</")
        .replace(&format!("<{prefix}:"), "<")
}

/// Collects `<prefix:name>text<` pairs from anywhere in the reply. The value is the raw text up to the next
/// `<`, decoded. Whitespace-only values are skipped and later occurrences of a name win.
pub fn prefixed_fields(raw: &str, prefix: &str) -> IndexMap<String, String> {
    let mut fields = IndexMap::new();

    let mut offset = 0;
    while let Some(resume) = scan_prefixed(&raw[offset..], prefix, &mut fields) {
        offset += resume;
    }

    fields
}

fn insert_field(fields: &mut IndexMap<String, String>, name: String, value: &str) {
    if !value.trim().is_empty() {
        fields.insert(name, decode_text(value));
    }
}

/// Scans until the end of `raw` or the first syntax error. On an error inside a field, the field is kept
/// and the offset to resume from is returned.
fn scan_prefixed(raw: &str, prefix: &str, fields: &mut IndexMap<String, String>) -> Option<usize> {
    let mut reader = permissive_reader(raw);
    // Local name and offset of the field content
    let mut pending: Option<(String, usize)> = None;

    loop {
        let event = match reader.read_event() {
            Ok(Event::Eof) => return None,
            Ok(event) => event,
            Err(_) => {
                let (name, start) = pending.take()?;
                let end = raw[start..].find('<').map_or(raw.len(), |index| start + index);
                insert_field(fields, name, &raw[start..end]);

                // Skip the closing tag of the field, parsing restarts right after it
                let resume = if raw[end..].starts_with("</") {
                    raw[end..].find('>').map_or(raw.len(), |index| end + index + 1)
                } else {
                    end
                };
                return (resume > 0 && resume < raw.len()).then_some(resume);
            }
        };

        match event {
            Event::Text(_) | Event::GeneralRef(_) => (),

            event => {
                if let Some((name, start)) = pending.take() {
                    let end = raw[start..].find('<').map_or(raw.len(), |index| start + index);
                    insert_field(fields, name, &raw[start..end]);
                }

                if let Event::Start(start) = event {
                    let qualified = start.name();
                    if qualified.prefix().map(|p| p.as_ref() == prefix.as_bytes()) == Some(true)
                        && start.attributes().next().is_none()
                    {
                        let local = String::from_utf8_lossy(qualified.local_name().as_ref()).into_owned();
                        pending = Some((local, position(&reader, raw)));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_OK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" xmlns:v1="http://tempuri.org/">
<SOAP-ENV:Body>
<v1:LoginWSService___LoginCli2Response>
<v1:strSesion>{ABC123}</v1:strSesion>
<v1:intCodAge>000000</v1:intCodAge>
</v1:LoginWSService___LoginCli2Response>
</SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

    #[test]
    fn detects_both_fault_markers() {
        assert!(is_fault("<SOAP-ENV:Body><SOAP-ENV:Fault></SOAP-ENV:Fault>"));
        assert!(is_fault("<soap:Body><soap:Fault></soap:Fault>"));
        assert!(!is_fault(LOGIN_OK));
    }

    #[test]
    fn decodes_fault_string() {
        let raw = "<SOAP-ENV:Fault><faultcode>SOAP-ENV:Server</faultcode>\
                   <faultstring>Albar&#225;n &lt;0001&gt; no encontrado</faultstring></SOAP-ENV:Fault>";
        assert_eq!(fault_string(raw).as_deref(), Some("Albarán <0001> no encontrado"));
        assert_eq!(fault_string("<SOAP-ENV:Fault></SOAP-ENV:Fault>"), None);
    }

    #[test]
    fn extracts_multiline_element_content() {
        let content = element_content(LOGIN_OK, "v1:LoginWSService___LoginCli2Response").unwrap();
        assert!(content.contains("<v1:strSesion>{ABC123}</v1:strSesion>"));
        assert!(content.contains("<v1:intCodAge>000000</v1:intCodAge>"));
        assert!(!content.contains("Response>"));
    }

    #[test]
    fn skips_nested_elements_with_the_same_name() {
        let raw = "<a><x><x>inner</x><y>1</y></x></a>";
        assert_eq!(element_content(raw, "x").as_deref(), Some("<x>inner</x><y>1</y>"));
    }

    #[test]
    fn missing_element() {
        assert_eq!(element_content(LOGIN_OK, "v1:WebServService___InfEnviosResponse"), None);
        assert_eq!(element_content("<a><x/></a>", "x").as_deref(), Some(""));
    }

    #[test]
    fn strips_tag_prefixes_only() {
        assert_eq!(
            strip_prefix(r#"<v1:strA at="v1:x">1</v1:strA><v1:strB/>"#, "v1"),
            r#"<strA at="v1:x">1</strA><strB/>"#
        );
    }

    #[test]
    fn collects_prefixed_fields() {
        let fields = prefixed_fields(LOGIN_OK, "v1");
        assert_eq!(fields.get("strSesion").map(String::as_str), Some("{ABC123}"));
        assert_eq!(fields.get("intCodAge").map(String::as_str), Some("000000"));
        assert!(!fields.contains_key("LoginWSService___LoginCli2Response"));
    }

    #[test]
    fn keeps_fields_found_before_malformed_markup() {
        let raw = "<v1:strError>Usuario o contrase&#241;a incorrectos</v1:strError><v1:broken <<<";
        let fields = prefixed_fields(raw, "v1");
        assert_eq!(
            fields.get("strError").map(String::as_str),
            Some("Usuario o contraseña incorrectos")
        );
    }

    #[test]
    fn ignores_other_prefixes_and_empty_values() {
        let fields = prefixed_fields("<v2:strSesion>X</v2:strSesion><v1:strError></v1:strError>", "v1");
        assert!(fields.is_empty());
    }

    #[test]
    fn lone_ampersands_are_kept() {
        let fields = prefixed_fields(
            "<v1:strError>Usuario & clave incorrectos</v1:strError><v1:intCod>3</v1:intCod>",
            "v1",
        );
        assert_eq!(
            fields.get("strError").map(String::as_str),
            Some("Usuario & clave incorrectos")
        );
        assert_eq!(fields.get("intCod").map(String::as_str), Some("3"));

        let raw = "<SOAP-ENV:Fault><faultstring>Albaran & bulto no validos</faultstring></SOAP-ENV:Fault>";
        assert_eq!(fault_string(raw).as_deref(), Some("Albaran & bulto no validos"));
    }

    #[test]
    fn decodes_html_entities() {
        let fields = prefixed_fields("<v1:strError>Contrase&ntilde;a no v&aacute;lida</v1:strError>", "v1");
        assert_eq!(
            fields.get("strError").map(String::as_str),
            Some("Contraseña no válida")
        );

        let raw = "<soap:Fault><faultstring>Albar&aacute;n no v&aacute;lido</faultstring></soap:Fault>";
        assert_eq!(fault_string(raw).as_deref(), Some("Albarán no válido"));
    }

    #[test]
    fn decode_text_keeps_unknown_references() {
        assert_eq!(decode_text("A & B &amp; C"), "A & B & C");
        assert_eq!(decode_text("R&D; &#241;"), "R&D; ñ");
        assert_eq!(decode_text("sin referencias"), "sin referencias");
    }

    #[test]
    fn keeps_field_interrupted_by_a_syntax_error() {
        let fields = prefixed_fields(
            "<v1:strSesion>{ABC123}</v1:strSesion><v1:strError>Usuario incorrecto<!x></v1:strError>",
            "v1",
        );
        assert_eq!(fields.get("strSesion").map(String::as_str), Some("{ABC123}"));
        assert_eq!(
            fields.get("strError").map(String::as_str),
            Some("Usuario incorrecto")
        );
    }

    #[test]
    fn fault_string_after_malformed_markup() {
        let raw = "<soap:Header><!x></soap:Header><soap:Fault><faultstring>Sesi&oacute;n caducada</faultstring></soap:Fault>";
        assert_eq!(fault_string(raw).as_deref(), Some("Sesión caducada"));
    }

    #[test]
    fn finds_element_after_malformed_markup() {
        let raw = "<SOAP-ENV:Envelope><SOAP-ENV:Header><v1:note>A & B</v1:note><!x></SOAP-ENV:Header>\n\
                   <SOAP-ENV:Body><v1:WebServService___InfEnviosResponse>\n\
                   <v1:strInfEnvios>&lt;CONSULTA/&gt;</v1:strInfEnvios>\n\
                   </v1:WebServService___InfEnviosResponse></SOAP-ENV:Body></SOAP-ENV:Envelope>";

        let content = element_content(raw, "v1:WebServService___InfEnviosResponse").unwrap();
        assert!(content.contains("<v1:strInfEnvios>&lt;CONSULTA/&gt;</v1:strInfEnvios>"));
    }

    #[test]
    fn finds_element_after_lone_ampersand() {
        let raw = "<SOAP-ENV:Header><v1:note>A & B</v1:note></SOAP-ENV:Header>\
                   <v1:WebServService___InfEnviosResponse><v1:intTotal>1</v1:intTotal>\
                   </v1:WebServService___InfEnviosResponse>";

        assert_eq!(
            element_content(raw, "v1:WebServService___InfEnviosResponse").as_deref(),
            Some("<v1:intTotal>1</v1:intTotal>")
        );
    }
}
