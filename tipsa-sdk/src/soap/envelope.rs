use quick_xml::escape::escape;

pub const SOAPENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const TEMPURI_NS: &str = "http://tempuri.org/";

/// Element name the carrier uses for a method of a service, e.g. `WebServService___InfEnvios`.
pub fn qualified_method(service: &str, method: &str) -> String {
    format!("{service}___{method}")
}

/// Builds the body of a request. Parameters keep their order, values are escaped.
pub fn build_request<K, V>(service: &str, method: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let element = qualified_method(service, method);

    let mut body = format!("<tem:{element}>");
    for (key, value) in params {
        let key = key.as_ref();
        body.push_str(&format!("<tem:{key}>{}</tem:{key}>", escape(value.as_ref())));
    }
    body.push_str(&format!("</tem:{element}>"));

    body
}

/// Wraps a request body in an envelope. The header is only written when there is a session ID to carry.
pub fn wrap_envelope(body: &str, session_id: Option<&str>) -> String {
    let header = match session_id {
        Some(session_id) => format!(
            "<soapenv:Header>\
             <tem:ROClientIDHeader><tem:ID>{}</tem:ID></tem:ROClientIDHeader>\
             </soapenv:Header>\n",
            escape(session_id)
        ),
        None => String::new(),
    };

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
        <soapenv:Envelope xmlns:soapenv=\"{SOAPENV_NS}\" xmlns:tem=\"{TEMPURI_NS}\">\n\
        {header}\
        <soapenv:Body>\n{body}\n</soapenv:Body>\n\
        </soapenv:Envelope>"
    )
}
