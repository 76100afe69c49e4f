use crate::replies;
use crate::request::SoapRequest;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hyper::Request;
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server;
use log::{error, trace};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::TcpListener;
use tower_service::Service;

pub const AGENCY: &str = "000000";
pub const CLIENT: &str = "123456";
pub const PASSWORD: &str = "miClave";
pub const SESSION_ID: &str = "{6D2A1F3C-52B0-4B7E-9A51-5F2C0E1D7A10}";

const LOGIN_SERVICE: &str = "LoginWSService";
const BUSINESS_SERVICE: &str = "WebServService";

/// Stand-in for both carrier services on a single `/SOAP` route, dispatched on the `service` query parameter.
#[derive(Default)]
pub struct MockTipsa {
    logins: AtomicUsize,
}

impl MockTipsa {
    /// Successful logins so far.
    pub fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub async fn serve(self: Arc<Self>, listener: TcpListener) {
        let app = Router::new()
            .route("/SOAP", post(Self::soap))
            .with_state(self);

        loop {
            let (socket, _remote_addr) = match listener.accept().await {
                Ok(l) => l,
                Err(error) => {
                    error!("Could not accept connection: {error}");
                    continue;
                }
            };

            let tower_service = app.clone();

            tokio::spawn(async move {
                let socket = TokioIo::new(socket);
                let hyper_service =
                    hyper::service::service_fn(move |request: Request<Incoming>| {
                        tower_service.clone().call(request)
                    });

                let mut builder = server::conn::auto::Builder::new(TokioExecutor::new());
                builder.http1().title_case_headers(true);

                if let Err(err) = builder
                    .serve_connection_with_upgrades(socket, hyper_service)
                    .await
                {
                    error!("Failed to serve connection: {err:#}");
                }
            });
        }
    }

    async fn soap(
        State(mock): State<Arc<Self>>,
        Query(query): Query<HashMap<String, String>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> impl IntoResponse {
        let envelope = decode_body(&headers, &body);
        trace!("C: {envelope}");

        let service = query.get("service").map(String::as_str).unwrap_or_default();
        let (status, reply) = match SoapRequest::parse(&envelope) {
            Ok(request) => match service {
                LOGIN_SERVICE => (StatusCode::OK, mock.login(&request)),
                BUSINESS_SERVICE => mock.business(&request),
                _ => (
                    StatusCode::NOT_FOUND,
                    replies::fault(&format!("Unknown service {service}")),
                ),
            },

            Err(error) => (
                StatusCode::BAD_REQUEST,
                replies::fault(&format!("Malformed request: {error}")),
            ),
        };

        trace!("S: {reply}");
        (
            status,
            [(header::CONTENT_TYPE, "text/xml; charset=UTF-8")],
            reply,
        )
    }

    fn login(&self, request: &SoapRequest) -> String {
        let fields = if request.field("strCodAge") == AGENCY
            && request.field("strCod") == CLIENT
            && request.field("strPass") == PASSWORD
        {
            self.logins.fetch_add(1, Ordering::SeqCst);
            vec![("strSesion", SESSION_ID.to_string())]
        } else {
            vec![("strError", "Usuario o contraseña incorrectos".to_string())]
        };

        replies::response(LOGIN_SERVICE, "LoginCli2", &fields)
    }

    fn business(&self, request: &SoapRequest) -> (StatusCode, String) {
        if request.session_id() != Some(SESSION_ID) {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                replies::fault("Sesión no válida"),
            );
        }

        let method = request.method.as_str();
        let fields = match method {
            "InfEnvios" => vec![(
                "strInfEnvios",
                replies::shipments_by_date(request.field("dtFecha")),
            )],

            "ConsEnvEstadosRef" => match replies::statuses_by_reference(request.field("strRef")) {
                Some(statuses) => vec![("strEnvEstadosRef", statuses)],
                None => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        replies::fault("Referencia no encontrada"),
                    );
                }
            },

            "ConsUltimoEstadoEnvio" => vec![(
                "strUltimoEstadoEnvio",
                replies::last_status(request.field("strAlbaran")),
            )],

            "ConsAlbaranEnvio" => match request.field("strAlbaran") {
                "0000001" => vec![("strAlbEnt", "JVBERi0x\nLjQK".to_string())],
                _ => vec![("strAlbEnt", String::new())],
            },

            "ConsEnvIncidenciasFecha" => vec![(
                "strEnvIncidencias",
                replies::incidents_by_date(request.field("dtFecha")),
            )],

            "GrabaEnvio24" => {
                if request.field("boInsert") != "1" {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        replies::fault("Modificación de envíos no permitida"),
                    );
                }

                vec![
                    ("strAlbaranOut", "0000003".to_string()),
                    ("strNomDes", request.field("strNomDes").to_string()),
                ]
            }

            "ConsEtiquetaEnvio8" => {
                let label = match request.field("strAlbaran") {
                    "0000001" => STANDARD.encode(format!(
                        "{} {} {}-{} {} {}",
                        request.field("strCodAgeOri"),
                        request.field("strFormato"),
                        request.field("strNumBultoDesde"),
                        request.field("strNumBultoHasta"),
                        request.field("intPosIni"),
                        request.field("intIdRepDet"),
                    )),
                    _ => String::new(),
                };

                vec![("strEtiqueta", label)]
            }

            "ConsEnvio" => vec![(
                "strEnvio",
                replies::shipment(request.field("strAlbaran")),
            )],

            "ConsEnvEstados" => vec![(
                "strEnvEstados",
                replies::shipment_status(request.field("strAlbaran")),
            )],

            _ => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    replies::fault(&format!("Unknown method {method}")),
                );
            }
        };

        (
            StatusCode::OK,
            replies::response(BUSINESS_SERVICE, method, &fields),
        )
    }
}

/// Request bodies are UTF-8 unless the content type says ISO-8859-1.
fn decode_body(headers: &HeaderMap, body: &[u8]) -> String {
    let latin1 = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_uppercase().contains("ISO-8859-1"));

    if latin1 {
        body.iter().map(|&byte| char::from(byte)).collect()
    } else {
        String::from_utf8_lossy(body).into_owned()
    }
}
