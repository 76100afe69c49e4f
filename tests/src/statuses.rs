use crate::start_mock;
use tipsa_sdk::client::Client;

#[tokio::test]
async fn statuses_by_reference() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();

    let statuses = client.get_statuses_by_reference("PEDIDO-7").await.unwrap();
    let dates: Vec<&str> = statuses.iter().map(|status| status.date.as_str()).collect();
    assert_eq!(
        dates,
        ["2024-06-01 18:02:00", "2024-06-03 08:15:00", "2024-06-03 12:41:00"]
    );

    let codes: Vec<&str> = statuses.iter().map(|status| status.code.as_str()).collect();
    assert_eq!(codes, ["Tránsito", "Reparto", "Entregado"]);
    assert_eq!(statuses.iter().filter(|status| status.last).count(), 1);
    assert!(statuses[2].last);
}

#[tokio::test]
async fn single_status() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();

    let statuses = client.get_statuses_by_reference("PEDIDO-8").await.unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].service, "14H");
    assert_eq!(statuses[0].code, "Disponible");
}

#[tokio::test]
async fn last_status_by_waybill() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();

    let statuses = client.get_last_status_by_waybill("0000001").await.unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].code_type, "3");
    assert!(statuses[0].last);

    assert!(client
        .get_last_status_by_waybill("9999999")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn shipment_status() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();

    let status = client.get_shipment_status("0000001").await.unwrap();
    assert_eq!(status.text("V_COD_TIPO_EST"), "3");
    assert!(client.get_shipment_status("9999999").await.unwrap().is_empty());
}
