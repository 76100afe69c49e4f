pub mod label;
pub mod shipment_field;
pub mod shipment_status;
