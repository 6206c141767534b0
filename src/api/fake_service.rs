//! In-process stand-in for the analysis service, used by client and session tests.

use crate::environment::Environment;
use axum::Router;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SUMMARY_JSON: &str = r#"{
    "total_count": 12,
    "distribution": {"Reactor": 5, "Pump": 7},
    "averages": {"temp": 72.345, "pressure": 5.12, "flowrate": 118.4}
}"#;

pub const HISTORY_JSON: &str = r#"[
    {"id": 16, "file_name": "batch_06.csv", "uploaded_at": "2024-05-06 09:10",
     "results": {"total_count": 12, "distribution": {"Reactor": 5, "Pump": 7}, "averages": {"temp": 72.25}}},
    {"id": 15, "file_name": "batch_05.csv", "uploaded_at": "2024-05-05 09:10",
     "results": {"total_count": 8, "distribution": {"Pump": 8}, "averages": {"temp": 61.5}}},
    {"id": 14, "file_name": "batch_04.csv", "uploaded_at": "2024-05-04 09:10",
     "results": {"total_count": 4, "distribution": {"Valve": 4}, "averages": {"temp": 40.0}}},
    {"id": 13, "file_name": "batch_03.csv", "uploaded_at": "2024-05-03 09:10",
     "results": {"total_count": 3, "distribution": {"Reactor": 3}, "averages": {"temp": 95.75}}},
    {"id": 12, "file_name": "batch_02.csv", "uploaded_at": "2024-05-02 09:10",
     "results": {"total_count": 9, "distribution": {"Exchanger": 9}, "averages": {"temp": 55.5}}},
    {"id": 11, "file_name": "batch_01.csv", "uploaded_at": "2024-05-01 09:10",
     "results": {"total_count": 2, "distribution": {"Pump": 2}, "averages": {"temp": 33.0}}}
]"#;

pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n% fake report\n%%EOF\n";

/// One request as seen by the fake service.
#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    pub route: String,
    pub authorization: Option<String>,
    pub field_name: Option<String>,
    pub file_name: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct FakeServiceBuilder {
    history_status: u16,
    history_body: String,
    upload_status: u16,
    upload_body: String,
    upload_delay: Option<Duration>,
    pdf_status: u16,
}

impl Default for FakeServiceBuilder {
    fn default() -> Self {
        Self {
            history_status: 200,
            history_body: HISTORY_JSON.to_string(),
            upload_status: 200,
            upload_body: SUMMARY_JSON.to_string(),
            upload_delay: None,
            pdf_status: 200,
        }
    }
}

impl FakeServiceBuilder {
    pub fn history_status(mut self, status: u16) -> Self {
        self.history_status = status;
        self
    }

    pub fn history_body(mut self, body: &str) -> Self {
        self.history_body = body.to_string();
        self
    }

    pub fn upload_status(mut self, status: u16) -> Self {
        self.upload_status = status;
        self
    }

    pub fn upload_body(mut self, body: &str) -> Self {
        self.upload_body = body.to_string();
        self
    }

    /// Holds every upload response back for `delay`.
    pub fn upload_delay(mut self, delay: Duration) -> Self {
        self.upload_delay = Some(delay);
        self
    }

    pub fn pdf_status(mut self, status: u16) -> Self {
        self.pdf_status = status;
        self
    }

    pub async fn start(self) -> FakeService {
        let shared = Arc::new(Shared {
            config: self,
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .route("/api/upload/", get(history).post(upload))
            .route("/api/export-pdf/", get(export_pdf))
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeService { addr, shared }
    }
}

struct Shared {
    config: FakeServiceBuilder,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl Shared {
    fn record(&self, request: RecordedRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

pub struct FakeService {
    addr: SocketAddr,
    shared: Arc<Shared>,
}

impl FakeService {
    pub fn builder() -> FakeServiceBuilder {
        FakeServiceBuilder::default()
    }

    pub async fn start() -> FakeService {
        FakeServiceBuilder::default().start().await
    }

    pub fn environment(&self) -> Environment {
        Environment::Custom {
            api_url: format!("http://{}", self.addr),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn json(code: u16, body: String) -> Response {
    (status(code), [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn history(State(shared): State<Arc<Shared>>, headers: HeaderMap) -> Response {
    shared.record(RecordedRequest {
        route: "GET /api/upload/".to_string(),
        authorization: authorization(&headers),
        ..RecordedRequest::default()
    });
    json(
        shared.config.history_status,
        shared.config.history_body.clone(),
    )
}

async fn upload(
    State(shared): State<Arc<Shared>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut request = RecordedRequest {
        route: "POST /api/upload/".to_string(),
        authorization: authorization(&headers),
        ..RecordedRequest::default()
    };
    while let Ok(Some(field)) = multipart.next_field().await {
        request.field_name = field.name().map(str::to_string);
        request.file_name = field.file_name().map(str::to_string);
        request.body = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
    }
    shared.record(request);
    if let Some(delay) = shared.config.upload_delay {
        tokio::time::sleep(delay).await;
    }
    json(
        shared.config.upload_status,
        shared.config.upload_body.clone(),
    )
}

async fn export_pdf(State(shared): State<Arc<Shared>>, headers: HeaderMap) -> Response {
    shared.record(RecordedRequest {
        route: "GET /api/export-pdf/".to_string(),
        authorization: authorization(&headers),
        ..RecordedRequest::default()
    });
    (
        status(shared.config.pdf_status),
        [(header::CONTENT_TYPE, "application/pdf")],
        PDF_BYTES,
    )
        .into_response()
}
