use crate::start_mock;
use tipsa_sdk::client::Client;
use tipsa_sdk::models::shipment_field::ShipmentField;
use tipsa_sdk::sdk_error::SdkError;

#[tokio::test]
async fn unknown_reference() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();

    let error = client.get_statuses_by_reference("NO-EXISTE").await.unwrap_err();
    assert_eq!(
        error,
        SdkError::VendorFault {
            reason: "Referencia no encontrada".to_string()
        }
    );
    assert_eq!(error.to_string(), "TIPSA API Error: Referencia no encontrada");

    // A fault does not end the session
    assert!(client.is_authenticated());
    assert!(client.get_statuses_by_reference("PEDIDO-8").await.is_ok());
}

#[tokio::test]
async fn rejected_update() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();

    let error = client
        .create_shipment(&[ShipmentField::new("boInsert", "0")])
        .await
        .unwrap_err();
    assert_eq!(
        error,
        SdkError::VendorFault {
            reason: "Modificación de envíos no permitida".to_string()
        }
    );
}

#[tokio::test]
async fn missing_delivery_note() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();

    assert_eq!(
        client.get_delivery_note("9999999").await,
        Err(SdkError::MissingField {
            field: "strAlbEnt".to_string()
        })
    );
}
