#[cfg(test)]
mod faults;
#[cfg(test)]
mod login;
#[cfg(test)]
mod shipments;
#[cfg(test)]
mod statuses;

use env_logger::Env;
use mock_server::MockTipsa;
use mock_server::mock_tipsa::{AGENCY, CLIENT, PASSWORD};
use std::sync::Arc;
use tipsa_sdk::config::ClientConfig;

/// Starts a mock on a free port and returns it with a config pointing at it.
pub async fn start_mock() -> (Arc<MockTipsa>, ClientConfig) {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("trace"))
        .is_test(true)
        .try_init();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind mock TIPSA server");
    let address = listener.local_addr().expect("Mock has no local address");

    let mock = Arc::new(MockTipsa::default());
    tokio::spawn(mock.clone().serve(listener));

    let config = ClientConfig::new(AGENCY, CLIENT, PASSWORD)
        .with_base_url(&format!("http://{address}/SOAP?service="))
        .with_timeout_secs(5);

    (mock, config)
}
