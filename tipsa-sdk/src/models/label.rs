use serde::Deserialize;

/// Formats the carrier can render a label in.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum LabelFormat {
    Pdf,
    Zpl,
    #[default]
    Txt,
}

impl LabelFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelFormat::Pdf => "pdf",
            LabelFormat::Zpl => "zpl",
            LabelFormat::Txt => "txt",
        }
    }
}

/// Parameters for requerying the label of a shipment. Parcels are numbered from 1.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct LabelRequest {
    pub waybill: String,
    pub format: LabelFormat,
    /// Report layout, 0 for the agency default.
    pub report_id: u32,
    pub parcel_from: u32,
    pub parcel_to: u32,
    /// Position of the first label on the sheet.
    pub start_position: u32,
}

impl LabelRequest {
    pub fn new(waybill: &str) -> Self {
        Self {
            waybill: waybill.to_string(),
            format: LabelFormat::default(),
            report_id: 0,
            parcel_from: 1,
            parcel_to: 1,
            start_position: 1,
        }
    }

    pub fn with_format(mut self, format: LabelFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_parcels(mut self, from: u32, to: u32) -> Self {
        self.parcel_from = from;
        self.parcel_to = to;
        self
    }
}
