use env_logger::Env;
use log::info;
use mock_server::MockTipsa;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("trace")).init();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8099")
        .await
        .expect("Could not bind mock TIPSA server");

    info!("Starting Mock Server on http://127.0.0.1:8099/SOAP?service=");
    Arc::new(MockTipsa::default()).serve(listener).await;
}
