use crate::start_mock;
use tipsa_sdk::client::Client;
use tipsa_sdk::encoding::TextEncoding;
use tipsa_sdk::models::label::{LabelFormat, LabelRequest};
use tipsa_sdk::models::shipment_field::ShipmentField;

#[tokio::test]
async fn shipments_by_date() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();

    let shipments = client.get_shipments_by_date("2024/06/01").await.unwrap();
    let entries = shipments.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].attribute("V_ALBARAN"), "0000001");
    assert_eq!(entries[0].attribute("V_NOM_DES"), "Ana Peña");
    assert_eq!(entries[1].attribute("V_NOM_DES"), "Luis & Marta");

    assert!(client.get_shipments_by_date("2024/06/02").await.unwrap().is_empty());
}

#[tokio::test]
async fn incidents_by_date() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();

    let incidents = client.get_incidents_by_date("2024/06/01").await.unwrap();
    assert_eq!(incidents.attribute("V_DES"), "Destinatario ausente");
}

#[tokio::test]
async fn shipment_master_data() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();

    let shipment = client.get_shipment("0000001").await.unwrap();
    assert_eq!(shipment.text("V_REF"), "PEDIDO-7");
    assert_eq!(shipment.text("F_PESO_VOL"), "3.5");

    assert!(client.get_shipment("9999999").await.unwrap().is_empty());
}

#[tokio::test]
async fn delivery_note() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();

    let note = client.get_delivery_note("0000001").await.unwrap();
    assert!(note.starts_with(b"%PDF"));
}

#[tokio::test]
async fn label() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();

    let label = client
        .requery_label(
            &LabelRequest::new("0000001")
                .with_format(LabelFormat::Zpl)
                .with_parcels(1, 3),
        )
        .await
        .unwrap();
    assert_eq!(label.as_deref(), Some(&b"000000 zpl 1-3 1 0"[..]));

    let missing = client
        .requery_label(&LabelRequest::new("9999999"))
        .await
        .unwrap();
    assert_eq!(missing, None);
}

#[tokio::test]
async fn create_shipment() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();

    let result = client
        .create_shipment(&[
            ShipmentField::new("strNomDes", "Ana Peña <Portería>"),
            ShipmentField::new("intPaq", 2),
        ])
        .await
        .unwrap();

    assert_eq!(result.text("strAlbaranOut"), "0000003");
    assert_eq!(result.text("strNomDes"), "Ana Peña <Portería>");
}

#[tokio::test]
async fn create_shipment_in_latin1() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config.with_encoding(TextEncoding::Latin1)).unwrap();

    let result = client
        .create_shipment(&[ShipmentField::new("strNomDes", "Peña € Núñez")])
        .await
        .unwrap();

    assert_eq!(result.text("strNomDes"), "Peña € Núñez");
}
