use crate::start_mock;
use mock_server::mock_tipsa::SESSION_ID;
use tipsa_sdk::client::{Client, Session};
use tipsa_sdk::sdk_error::SdkError;

#[tokio::test]
async fn logs_in_on_first_call_only() {
    let (mock, config) = start_mock().await;
    let mut client = Client::new(config).unwrap();
    assert!(!client.is_authenticated());

    client.get_shipments_by_date("2024/06/01").await.unwrap();
    client.get_incidents_by_date("2024/06/01").await.unwrap();
    client.get_shipment("0000001").await.unwrap();

    assert_eq!(client.session(), &Session::Authenticated(SESSION_ID.to_string()));
    assert_eq!(mock.logins(), 1);
}

#[tokio::test]
async fn wrong_password() {
    let (mock, mut config) = start_mock().await;
    config.password = "wrong".to_string();
    let mut client = Client::new(config).unwrap();

    let error = client.get_shipments_by_date("2024/06/01").await.unwrap_err();
    assert_eq!(
        error,
        SdkError::Authentication {
            reason: "Usuario o contraseña incorrectos".to_string()
        }
    );
    assert!(!client.is_authenticated());
    assert_eq!(mock.logins(), 0);
}

#[tokio::test]
async fn unreachable_carrier() {
    let (_, config) = start_mock().await;
    let mut client = Client::new(config.with_base_url("http://127.0.0.1:9/SOAP?service=")).unwrap();

    let error = client.get_shipment("0000001").await.unwrap_err();
    assert!(error.is_retryable());
    assert!(!client.is_authenticated());
}
