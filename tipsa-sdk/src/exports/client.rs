use crate::config::ClientConfig;
use crate::models::label::LabelRequest;
use crate::models::shipment_field::ShipmentField;
use crate::models::shipment_status::ShipmentStatus;
use crate::sdk_error::SdkError;
use tokio::runtime::Runtime;
use tokio::sync::Mutex;

/// Blocking client for foreign bindings. Documents come back as JSON, in the same shape as
/// [XmlValue][crate::soap::XmlValue].
#[derive(uniffi::Object)]
pub struct TipsaClient {
    inner: Mutex<crate::client::Client>,
    rt: Runtime,
}

#[uniffi::export]
impl TipsaClient {
    /// Validates the configuration and returns a new instance. Nothing is sent until the first operation.
    #[uniffi::constructor]
    pub fn new(config: ClientConfig) -> Result<Self, SdkError> {
        let rt = Runtime::new().or(Err(SdkError::CouldNotCreateRuntime))?;
        let client = crate::client::Client::new(config)?;

        Ok(Self {
            inner: Mutex::new(client),
            rt,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.rt
            .block_on(async { self.inner.lock().await.is_authenticated() })
    }

    /// Shipments registered on a date, given as `YYYY/MM/DD`.
    pub fn get_shipments_by_date(&self, date: String) -> Result<String, SdkError> {
        self.rt.block_on(async {
            let mut client = self.inner.lock().await;
            client.get_shipments_by_date(&date).await?.to_json()
        })
    }

    /// Status history of a shipment by customer reference, oldest first.
    pub fn get_statuses_by_reference(
        &self,
        reference: String,
    ) -> Result<Vec<ShipmentStatus>, SdkError> {
        self.rt.block_on(async {
            let mut client = self.inner.lock().await;
            client.get_statuses_by_reference(&reference).await
        })
    }

    pub fn get_last_status_by_waybill(
        &self,
        waybill: String,
    ) -> Result<Vec<ShipmentStatus>, SdkError> {
        self.rt.block_on(async {
            let mut client = self.inner.lock().await;
            client.get_last_status_by_waybill(&waybill).await
        })
    }

    pub fn get_delivery_note(&self, waybill: String) -> Result<Vec<u8>, SdkError> {
        self.rt.block_on(async {
            let mut client = self.inner.lock().await;
            client.get_delivery_note(&waybill).await
        })
    }

    /// Incidents registered on a date, given as `YYYY/MM/DD`.
    pub fn get_incidents_by_date(&self, date: String) -> Result<String, SdkError> {
        self.rt.block_on(async {
            let mut client = self.inner.lock().await;
            client.get_incidents_by_date(&date).await?.to_json()
        })
    }

    pub fn create_shipment(&self, fields: Vec<ShipmentField>) -> Result<String, SdkError> {
        self.rt.block_on(async {
            let mut client = self.inner.lock().await;
            client.create_shipment(&fields).await?.to_json()
        })
    }

    /// Decoded label, `None` if the carrier has none for the shipment.
    pub fn requery_label(&self, request: LabelRequest) -> Result<Option<Vec<u8>>, SdkError> {
        self.rt.block_on(async {
            let mut client = self.inner.lock().await;
            client.requery_label(&request).await
        })
    }

    pub fn get_shipment(&self, waybill: String) -> Result<String, SdkError> {
        self.rt.block_on(async {
            let mut client = self.inner.lock().await;
            client.get_shipment(&waybill).await?.to_json()
        })
    }

    pub fn get_shipment_status(&self, waybill: String) -> Result<String, SdkError> {
        self.rt.block_on(async {
            let mut client = self.inner.lock().await;
            client.get_shipment_status(&waybill).await?.to_json()
        })
    }
}
