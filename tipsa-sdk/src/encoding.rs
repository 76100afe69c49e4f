use serde::Deserialize;

/// Byte encoding applied to outgoing envelopes right before they hit the wire.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1. Characters outside of it are sent as numeric character references.
    Latin1,
}

impl TextEncoding {
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Latin1 => "ISO-8859-1",
        }
    }

    pub fn content_type(&self) -> String {
        format!("text/xml; charset={}", self.label())
    }

    /// Encodes a whole XML document, rewriting its declaration to match.
    pub fn encode(&self, xml: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => xml.as_bytes().to_vec(),
            TextEncoding::Latin1 => {
                let xml = xml.replacen(
                    r#"encoding="UTF-8""#,
                    &format!(r#"encoding="{}""#, self.label()),
                    1,
                );

                let mut bytes = Vec::with_capacity(xml.len());
                for c in xml.chars() {
                    match u8::try_from(u32::from(c)) {
                        Ok(byte) => bytes.push(byte),
                        Err(_) => bytes.extend_from_slice(format!("&#{};", u32::from(c)).as_bytes()),
                    }
                }

                bytes
            }
        }
    }
}
