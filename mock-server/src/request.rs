use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use std::collections::HashMap;

const METHOD_SEPARATOR: &str = "___";

/// What the mock needs from a request envelope: the method and every leaf element by local name.
#[derive(Debug, Default)]
pub struct SoapRequest {
    pub method: String,
    pub fields: HashMap<String, String>,
}

impl SoapRequest {
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or_default()
    }

    /// Session token from the `ROClientIDHeader`, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.fields.get("ID").map(String::as_str)
    }

    pub fn parse(envelope: &str) -> Result<Self, quick_xml::Error> {
        let mut reader = Reader::from_str(envelope);
        let mut request = SoapRequest::default();
        let mut current: Option<(String, String)> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let local = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    if let Some((_, method)) = local.split_once(METHOD_SEPARATOR) {
                        request.method = method.to_string();
                    }

                    current = Some((local, String::new()));
                }

                Event::Empty(start) => {
                    let local = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    request.fields.insert(local, String::new());
                }

                Event::Text(text) => {
                    if let Some((_, value)) = current.as_mut() {
                        value.push_str(&String::from_utf8_lossy(&text));
                    }
                }

                Event::GeneralRef(reference) => {
                    if let Some((_, value)) = current.as_mut() {
                        value.push_str(&format!("&{};", String::from_utf8_lossy(&reference)));
                    }
                }

                Event::End(_) => {
                    if let Some((name, value)) = current.take() {
                        let value = unescape(&value)
                            .map(|text| text.into_owned())
                            .unwrap_or(value.clone());
                        request.fields.insert(name, value);
                    }
                }

                Event::Eof => break,
                _ => (),
            }
        }

        Ok(request)
    }
}
