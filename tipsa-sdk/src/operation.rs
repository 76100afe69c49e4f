//! The carrier methods this SDK calls, with their vendor parameter names and where their answer lives.

pub const LOGIN_SERVICE: &str = "LoginWSService";
pub const BUSINESS_SERVICE: &str = "WebServService";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Login,
    Business,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Service::Login => LOGIN_SERVICE,
            Service::Business => BUSINESS_SERVICE,
        }
    }

    /// Only the business service needs a session.
    pub fn requires_session(&self) -> bool {
        matches!(self, Service::Business)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub service: Service,
    pub method: &'static str,
    /// Vendor parameter names, in the order they are sent.
    pub params: &'static [&'static str],
    /// Field of the reply holding the useful payload.
    pub response_field: Option<&'static str>,
    /// Node to pick from the document embedded in [response_field][Operation::response_field].
    pub node: Option<&'static str>,
}

impl Operation {
    /// Pairs the vendor parameter names with values given in the same order.
    pub fn bind<V: ToString>(&self, values: &[V]) -> Vec<(String, String)> {
        debug_assert_eq!(
            self.params.len(),
            values.len(),
            "{} takes {} parameters",
            self.method,
            self.params.len()
        );

        self.params
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }
}

pub const LOGIN: Operation = Operation {
    service: Service::Login,
    method: "LoginCli2",
    params: &["strCodAge", "strCod", "strPass", "strIdioma"],
    response_field: Some("strSesion"),
    node: None,
};

pub const SHIPMENTS_BY_DATE: Operation = Operation {
    service: Service::Business,
    method: "InfEnvios",
    params: &["dtFecha"],
    response_field: Some("strInfEnvios"),
    node: Some("INF_ENVIOS"),
};

pub const STATUSES_BY_REFERENCE: Operation = Operation {
    service: Service::Business,
    method: "ConsEnvEstadosRef",
    params: &["strRef"],
    response_field: Some("strEnvEstadosRef"),
    node: Some("ENV_ESTADOS_REF"),
};

pub const LAST_STATUS_BY_WAYBILL: Operation = Operation {
    service: Service::Business,
    method: "ConsUltimoEstadoEnvio",
    params: &["strAlbaran"],
    response_field: Some("strUltimoEstadoEnvio"),
    node: Some("CONS_ULTIMO_ESTADO_ENVIO"),
};

pub const DELIVERY_NOTE: Operation = Operation {
    service: Service::Business,
    method: "ConsAlbaranEnvio",
    params: &["strAlbaran"],
    response_field: Some("strAlbEnt"),
    node: None,
};

pub const INCIDENTS_BY_DATE: Operation = Operation {
    service: Service::Business,
    method: "ConsEnvIncidenciasFecha",
    params: &["dtFecha"],
    response_field: Some("strEnvIncidencias"),
    node: Some("ENV_INCIDENCIAS"),
};

/// Caller-supplied shipment fields follow `boInsert`.
pub const CREATE_SHIPMENT: Operation = Operation {
    service: Service::Business,
    method: "GrabaEnvio24",
    params: &["boInsert"],
    response_field: None,
    node: None,
};

pub const LABEL: Operation = Operation {
    service: Service::Business,
    method: "ConsEtiquetaEnvio8",
    params: &[
        "strCodAgeOri",
        "strAlbaran",
        "strNumBultoDesde",
        "strNumBultoHasta",
        "intPosIni",
        "intIdRepDet",
        "strFormato",
    ],
    response_field: Some("strEtiqueta"),
    node: None,
};

pub const SHIPMENT: Operation = Operation {
    service: Service::Business,
    method: "ConsEnvio",
    params: &["strCodAgeCargo", "strCodAgeOri", "strAlbaran"],
    response_field: Some("strEnvio"),
    node: Some("ENVIOS"),
};

pub const SHIPMENT_STATUS: Operation = Operation {
    service: Service::Business,
    method: "ConsEnvEstados",
    params: &["strCodAgeCargo", "strCodAgeOri", "strAlbaran"],
    response_field: Some("strEnvEstados"),
    node: Some("ENV_ESTADOS"),
};
