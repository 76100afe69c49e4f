//! A mock of the TIPSA login and business services, with canned replies for a handful of shipments.

pub mod mock_tipsa;
mod replies;
pub mod request;

pub use mock_tipsa::MockTipsa;
