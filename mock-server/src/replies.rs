use quick_xml::escape::escape;

const ENVELOPE_OPEN: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
    <SOAP-ENV:Envelope xmlns:SOAP-ENV=\"http://schemas.xmlsoap.org/soap/envelope/\" \
    xmlns:v1=\"http://tempuri.org/\">\n<SOAP-ENV:Body>\n";

const ENVELOPE_CLOSE: &str = "</SOAP-ENV:Body>\n</SOAP-ENV:Envelope>";

/// A `v1:`-prefixed reply to a method, values are escaped.
pub fn response(service: &str, method: &str, fields: &[(&str, String)]) -> String {
    let element = format!("v1:{service}___{method}Response");

    let mut reply = format!("{ENVELOPE_OPEN}<{element}>\n");
    for (name, value) in fields {
        reply.push_str(&format!("<v1:{name}>{}</v1:{name}>\n", escape(value.as_str())));
    }
    reply.push_str(&format!("</{element}>\n{ENVELOPE_CLOSE}"));

    reply
}

pub fn fault(message: &str) -> String {
    format!(
        "{ENVELOPE_OPEN}<SOAP-ENV:Fault>\
         <faultcode>SOAP-ENV:Server</faultcode>\
         <faultstring>{}</faultstring>\
         </SOAP-ENV:Fault>\n{ENVELOPE_CLOSE}",
        escape(message)
    )
}

pub fn shipments_by_date(date: &str) -> String {
    match date {
        "2024/06/01" => r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<CONSULTA>
<INF_ENVIOS V_COD_AGE_CARGO="000000" V_ALBARAN="0000001" V_REF="PEDIDO-7" V_NOM_DES="Ana Peña" I_BULTOS="2"/>
<INF_ENVIOS V_COD_AGE_CARGO="000000" V_ALBARAN="0000002" V_REF="PEDIDO-8" V_NOM_DES="Luis &amp; Marta" I_BULTOS="1"/>
</CONSULTA>"#
            .to_string(),
        _ => "<CONSULTA/>".to_string(),
    }
}

pub fn statuses_by_reference(reference: &str) -> Option<String> {
    match reference {
        "PEDIDO-7" => Some(
            r#"<CONSULTA>
<ENV_ESTADOS_REF V_SERVICIO="24H" B_ULT="1" D_FEC_HORA_ALTA="2024-06-03 12:41:00" V_COD_TIPO_EST="3"/>
<ENV_ESTADOS_REF V_SERVICIO="24H" B_ULT="0" D_FEC_HORA_ALTA="2024-06-01 18:02:00" V_COD_TIPO_EST="1"/>
<ENV_ESTADOS_REF V_SERVICIO="24H" B_ULT="0" D_FEC_HORA_ALTA="2024-06-03 08:15:00" V_COD_TIPO_EST="2"/>
</CONSULTA>"#
                .to_string(),
        ),
        "PEDIDO-8" => Some(
            r#"<CONSULTA><ENV_ESTADOS_REF V_SERVICIO="14H" B_ULT="1" D_FEC_HORA_ALTA="2024-06-02 10:00:00" V_COD_TIPO_EST="14"/></CONSULTA>"#
                .to_string(),
        ),
        _ => None,
    }
}

pub fn last_status(waybill: &str) -> String {
    match waybill {
        "0000001" => r#"<CONSULTA><CONS_ULTIMO_ESTADO_ENVIO V_SERVICIO="24H" B_ULT="1" D_FEC_HORA_ALTA="2024-06-03 12:41:00" V_COD_TIPO_EST="3"/></CONSULTA>"#
            .to_string(),
        _ => "<CONSULTA/>".to_string(),
    }
}

pub fn incidents_by_date(date: &str) -> String {
    match date {
        "2024/06/01" => r#"<CONSULTA><ENV_INCIDENCIAS V_ALBARAN="0000002" V_COD_TIPO_INC="12" V_DES="Destinatario ausente"/></CONSULTA>"#
            .to_string(),
        _ => "<CONSULTA/>".to_string(),
    }
}

pub fn shipment(waybill: &str) -> String {
    match waybill {
        "0000001" => r#"<CONSULTA><ENVIOS V_COD_AGE_CARGO="000000" V_COD_AGE_ORI="000000" V_ALBARAN="0000001" V_REF="PEDIDO-7" I_BULTOS="2" F_PESO_VOL="3.5"/></CONSULTA>"#
            .to_string(),
        _ => "<CONSULTA/>".to_string(),
    }
}

pub fn shipment_status(waybill: &str) -> String {
    match waybill {
        "0000001" => r#"<CONSULTA><ENV_ESTADOS V_ALBARAN="0000001" V_COD_TIPO_EST="3" D_FEC_HORA_ALTA="2024-06-03 12:41:00"/></CONSULTA>"#
            .to_string(),
        _ => "<CONSULTA/>".to_string(),
    }
}
