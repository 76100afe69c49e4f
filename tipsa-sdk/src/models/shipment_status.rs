use crate::soap::{ATTRIBUTES_KEY, XmlValue};
use serde::Serialize;

/// Labels for the carrier's numeric status codes.
pub const STATUS_CODES: [(&str, &str); 11] = [
    ("1", "Tránsito"),
    ("2", "Reparto"),
    ("3", "Entregado"),
    ("4", "Incidencia"),
    ("5", "Devuelto"),
    ("6", "Falta de expedición"),
    ("7", "Recanalizado"),
    ("9", "Falta de expedición administrativa"),
    ("10", "Destruído"),
    ("14", "Disponible"),
    ("15", "Entrega parcial"),
];

pub const UNKNOWN_STATUS: &str = "Indeterminado";

/// Human-readable label of a status code.
pub fn describe_status(code: &str) -> &'static str {
    STATUS_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_STATUS)
}

/// One step in the life of a shipment.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ShipmentStatus {
    /// Service code, e.g. `24H`.
    pub service: String,
    /// Whether this is the current status.
    pub last: bool,
    /// `YYYY-MM-DD HH:MM:SS` as sent by the carrier, sorts lexicographically.
    pub date: String,
    pub code_type: String,
    /// Label of [code_type][ShipmentStatus::code_type].
    pub code: String,
}

impl ShipmentStatus {
    fn from_attributes(attributes: Option<&XmlValue>) -> Self {
        let field = |name: &str| {
            attributes
                .map(|attributes| attributes.text(name))
                .unwrap_or_default()
                .to_string()
        };

        let code_type = field("V_COD_TIPO_EST");
        let last = field("B_ULT");

        Self {
            service: field("V_SERVICIO"),
            last: !last.is_empty() && last != "0",
            date: field("D_FEC_HORA_ALTA"),
            code: describe_status(&code_type).to_string(),
            code_type,
        }
    }
}

/// Flattens a status node into records sorted by date, oldest first.
///
/// The node is either a single entry, whose attributes sit directly under `@attributes`, or several
/// entries each carrying their own `@attributes`. Entries with equal dates keep the carrier's order.
pub fn parse_status_list(results: &XmlValue) -> Vec<ShipmentStatus> {
    let mut statuses: Vec<ShipmentStatus> = match results {
        XmlValue::Map(map) => map
            .iter()
            .map(|(key, entry)| {
                if key == ATTRIBUTES_KEY {
                    ShipmentStatus::from_attributes(Some(entry))
                } else {
                    ShipmentStatus::from_attributes(entry.attributes())
                }
            })
            .collect(),

        XmlValue::List(entries) => entries
            .iter()
            .map(|entry| ShipmentStatus::from_attributes(entry.attributes()))
            .collect(),

        XmlValue::Text(_) => Vec::new(),
    };

    statuses.sort_by(|a, b| a.date.cmp(&b.date));
    statuses
}
