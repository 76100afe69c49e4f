use crate::config::ClientConfig;
use crate::models::label::LabelRequest;
use crate::models::shipment_field::ShipmentField;
use crate::models::shipment_status::{ShipmentStatus, parse_status_list};
use crate::operation::{
    CREATE_SHIPMENT, DELIVERY_NOTE, INCIDENTS_BY_DATE, LABEL, LAST_STATUS_BY_WAYBILL, LOGIN,
    Operation, SHIPMENT, SHIPMENT_STATUS, SHIPMENTS_BY_DATE, STATUSES_BY_REFERENCE,
};
use crate::sdk_error::SdkError;
use crate::soap::{
    RESPONSE_PREFIX, XmlValue, build_request, parse_embedded_xml, parse_response_fragment,
    qualified_method, response_element, scanner, wrap_envelope,
};
use crate::transport::{HttpTransport, Transport};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::{debug, trace};

/// Reply field carrying the reason of a rejected login.
const LOGIN_ERROR_FIELD: &str = "strError";

/// Authentication state of a client. Login is the only transition and there is no way back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated(String),
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Unauthenticated => None,
            Session::Authenticated(token) => Some(token),
        }
    }
}

/// Defines the client itself, every carrier operation goes through an instance of this struct.
///
/// The session is logged in lazily by the first operation that needs it and kept for the lifetime of the
/// instance. Operations take `&mut self`, so one instance serves one caller at a time.
pub struct Client<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
    session: Session,
}

impl Client<HttpTransport> {
    /// Validates the configuration and sets up an HTTP transport for it. Nothing is sent yet.
    pub fn new(config: ClientConfig) -> Result<Self, SdkError> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            session: Session::Unauthenticated,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.token().is_some()
    }

    fn envelope(&self, body: &str, with_header: bool) -> String {
        let session_id = if with_header {
            self.session.token()
        } else {
            None
        };

        wrap_envelope(body, session_id)
    }

    async fn login(&mut self) -> Result<(), SdkError> {
        let service = LOGIN.service.name();
        let credentials = |password: &str| {
            LOGIN.bind(&[
                self.config.agency.as_str(),
                self.config.client.as_str(),
                password,
                self.config.language.as_str(),
            ])
        };

        let params = credentials(&self.config.password);
        let envelope = self.envelope(&build_request(service, LOGIN.method, &params), false);

        let masked = credentials("********");
        trace!(
            "C: {}",
            self.envelope(&build_request(service, LOGIN.method, &masked), false)
        );

        let response = self
            .transport
            .post(&self.config.url_for(service), &envelope)
            .await?;
        trace!("S: {response}");

        let mut fields = scanner::prefixed_fields(&response, RESPONSE_PREFIX);
        let session_field = LOGIN.response_field.unwrap_or_default();
        match fields.shift_remove(session_field) {
            Some(token) => {
                debug!("Logged in to agency {}", self.config.agency);
                self.session = Session::Authenticated(token);
                Ok(())
            }

            None => {
                let reason = fields
                    .shift_remove(LOGIN_ERROR_FIELD)
                    .or_else(|| scanner::fault_string(&response))
                    .unwrap_or("Unknown".to_string());

                debug!("Login rejected: {reason}");
                Err(SdkError::Authentication { reason })
            }
        }
    }

    /// Sends one request and turns the reply into a tree, logging in first if the method needs a session.
    pub(crate) async fn call(
        &mut self,
        operation: &Operation,
        params: &[(String, String)],
    ) -> Result<XmlValue, SdkError> {
        let service = operation.service.name();
        let needs_session = operation.service.requires_session();

        if needs_session && !self.is_authenticated() {
            self.login().await?;
        }

        let envelope = self.envelope(
            &build_request(service, operation.method, params),
            needs_session,
        );

        trace!("C: {envelope}");
        let response = self
            .transport
            .post(&self.config.url_for(service), &envelope)
            .await?;
        trace!("S: {response}");

        interpret_response(&response, service, operation.method)
    }

    async fn call_embedded(
        &mut self,
        operation: &Operation,
        params: &[(String, String)],
    ) -> Result<XmlValue, SdkError> {
        let result = self.call(operation, params).await?;

        let embedded = operation
            .response_field
            .and_then(|field| result.get(field))
            .and_then(XmlValue::as_text);

        Ok(parse_embedded_xml(
            embedded,
            operation.node.unwrap_or_default(),
        ))
    }

    fn agency_bound(&self, waybill: &str) -> [String; 3] {
        [
            self.config.agency.clone(),
            self.config.agency.clone(),
            waybill.to_string(),
        ]
    }

    /// Shipments registered on a date, given as `YYYY/MM/DD`.
    pub async fn get_shipments_by_date(&mut self, date: &str) -> Result<XmlValue, SdkError> {
        let params = SHIPMENTS_BY_DATE.bind(&[date]);
        self.call_embedded(&SHIPMENTS_BY_DATE, &params).await
    }

    /// Status history of the shipment with a customer reference, oldest first.
    pub async fn get_statuses_by_reference(
        &mut self,
        reference: &str,
    ) -> Result<Vec<ShipmentStatus>, SdkError> {
        let params = STATUSES_BY_REFERENCE.bind(&[reference]);
        let data = self.call_embedded(&STATUSES_BY_REFERENCE, &params).await?;

        if data.is_empty() {
            return Ok(Vec::new());
        }

        Ok(parse_status_list(&data))
    }

    /// Latest status of a shipment.
    ///
    /// The carrier does not document the shape of this reply, it is read like the status history.
    pub async fn get_last_status_by_waybill(
        &mut self,
        waybill: &str,
    ) -> Result<Vec<ShipmentStatus>, SdkError> {
        let params = LAST_STATUS_BY_WAYBILL.bind(&[waybill]);
        let data = self.call_embedded(&LAST_STATUS_BY_WAYBILL, &params).await?;

        if data.is_empty() {
            debug!("No latest status found for {waybill}");
            return Ok(Vec::new());
        }

        Ok(parse_status_list(&data))
    }

    /// Delivery note of a shipment, decoded. Usually a PDF.
    pub async fn get_delivery_note(&mut self, waybill: &str) -> Result<Vec<u8>, SdkError> {
        let params = DELIVERY_NOTE.bind(&[waybill]);
        let result = self.call(&DELIVERY_NOTE, &params).await?;

        let field = DELIVERY_NOTE.response_field.unwrap_or_default();
        match decode_base64(field, result.text(field))? {
            Some(content) => Ok(content),
            None => Err(SdkError::missing_field(field)),
        }
    }

    /// Incidents registered on a date, given as `YYYY/MM/DD`.
    pub async fn get_incidents_by_date(&mut self, date: &str) -> Result<XmlValue, SdkError> {
        let params = INCIDENTS_BY_DATE.bind(&[date]);
        self.call_embedded(&INCIDENTS_BY_DATE, &params).await
    }

    /// Records a new shipment and returns the carrier's reply as is.
    ///
    /// Fields are sent in the given order after `boInsert`, which a field of the same name overrides.
    pub async fn create_shipment(&mut self, fields: &[ShipmentField]) -> Result<XmlValue, SdkError> {
        let mut params = CREATE_SHIPMENT.bind(&["1"]);
        for field in fields {
            match params.iter_mut().find(|(name, _)| *name == field.name) {
                Some((_, value)) => *value = field.value.clone(),
                None => params.push((field.name.clone(), field.value.clone())),
            }
        }

        self.call(&CREATE_SHIPMENT, &params).await
    }

    /// Label of a shipment, decoded, or `None` if the carrier has none.
    pub async fn requery_label(
        &mut self,
        request: &LabelRequest,
    ) -> Result<Option<Vec<u8>>, SdkError> {
        let params = LABEL.bind(&[
            self.config.agency.clone(),
            request.waybill.clone(),
            request.parcel_from.to_string(),
            request.parcel_to.to_string(),
            request.start_position.to_string(),
            request.report_id.to_string(),
            request.format.as_str().to_string(),
        ]);
        let result = self.call(&LABEL, &params).await?;

        let field = LABEL.response_field.unwrap_or_default();
        decode_base64(field, result.text(field))
    }

    /// Master data of a shipment, as the attributes of its `ENVIOS` entry.
    pub async fn get_shipment(&mut self, waybill: &str) -> Result<XmlValue, SdkError> {
        let params = SHIPMENT.bind(&self.agency_bound(waybill));
        let data = self.call_embedded(&SHIPMENT, &params).await?;

        Ok(data.attributes().cloned().unwrap_or_default())
    }

    /// Current status of a shipment, as the attributes of its `ENV_ESTADOS` entry.
    pub async fn get_shipment_status(&mut self, waybill: &str) -> Result<XmlValue, SdkError> {
        let params = SHIPMENT_STATUS.bind(&self.agency_bound(waybill));
        let data = self.call_embedded(&SHIPMENT_STATUS, &params).await?;

        Ok(data.attributes().cloned().unwrap_or_default())
    }
}

/// Reads a raw reply: faults become errors, the method's response element becomes a tree.
fn interpret_response(raw: &str, service: &str, method: &str) -> Result<XmlValue, SdkError> {
    if scanner::is_fault(raw) {
        return Err(SdkError::VendorFault {
            reason: scanner::fault_string(raw).unwrap_or("SOAP Fault".to_string()),
        });
    }

    match scanner::element_content(raw, &response_element(service, method)) {
        Some(fragment) => parse_response_fragment(&fragment),
        None => Err(SdkError::UnrecognizedResponse {
            operation: qualified_method(service, method),
        }),
    }
}

/// Line breaks inside the encoded content are tolerated.
fn decode_base64(field: &str, encoded: &str) -> Result<Option<Vec<u8>>, SdkError> {
    let encoded: String = encoded.split_whitespace().collect();
    if encoded.is_empty() {
        return Ok(None);
    }

    STANDARD
        .decode(encoded)
        .map(Some)
        .map_err(|error| SdkError::InvalidContent {
            field: field.to_string(),
            reason: error.to_string(),
        })
}
