//! A client SDK for the TIPSA carrier web service. Logs in lazily, keeps the session for the lifetime of the client
//! and turns the carrier's SOAP replies into plain Rust values.
//! # Usage
//! ```no_run
//! use tipsa_sdk::client::Client;
//! use tipsa_sdk::config::{ClientConfig, Environment};
//!
//! # async fn run() -> Result<(), tipsa_sdk::SdkError> {
//! let config = ClientConfig::new("000000", "123456", "password")
//!     .with_environment(Environment::Production)
//!     .with_retries(2);
//!
//! let mut client = Client::new(config)?;
//!
//! // The first call logs in, the following ones reuse the session
//! let shipments = client.get_shipments_by_date("2024/06/01").await?;
//! println!("{}", shipments.to_json()?);
//!
//! for status in client.get_statuses_by_reference("ORDER-7").await? {
//!     println!("{} {}", status.date, status.code);
//! }
//! # Ok(())
//! # }
//! ```
//! # Bindings
//! Bindings for Kotlin and Swift can be generated with
//! [UniFFI](https://mozilla.github.io/uniffi-rs/latest/tutorial/foreign_language_bindings.html#multi-crate-workspaces).
//!

pub mod client;
pub mod config;
pub mod encoding;
mod exports;
pub mod models;
pub mod operation;
pub mod sdk_error;
pub mod soap;
pub mod transport;

uniffi::setup_scaffolding!();

pub use client::{Client, Session};
pub use config::{ClientConfig, Environment};
pub use encoding::TextEncoding;
pub use models::label::{LabelFormat, LabelRequest};
pub use models::shipment_field::ShipmentField;
pub use models::shipment_status::ShipmentStatus;
pub use sdk_error::SdkError;
pub use soap::XmlValue;
pub use transport::{HttpTransport, Transport};
