use serde::Deserialize;

/// A field of a new shipment, named the way the carrier names it (e.g. `strNomDes`, `intPaq`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ShipmentField {
    pub name: String,
    pub value: String,
}

impl ShipmentField {
    pub fn new(name: &str, value: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
