//! Equipment Analysis API Client
//!
//! HTTP client for the analysis service: upload history, CSV upload and PDF export.

use crate::api::EquipmentApi;
use crate::api::error::ApiError;
use crate::api::types::{HistoryEntry, UploadSummary, parse_history, parse_summary};
use crate::auth::Credentials;
use crate::consts::cli_consts::api::{
    EXPORT_PDF_ENDPOINT, UPLOAD_ENDPOINT, UPLOAD_FIELD_NAME, connect_timeout, request_timeout,
};
use crate::environment::Environment;
use crate::selection::SelectedFile;
use reqwest::header::{AUTHORIZATION, USER_AGENT as USER_AGENT_HEADER};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("equipment-visualizer/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: Environment,
    auth_header: String,
}

impl ApiClient {
    pub fn new(environment: Environment, credentials: &Credentials) -> Result<Self, ApiError> {
        Self::with_timeouts(environment, credentials, connect_timeout(), request_timeout())
    }

    /// A request still unanswered after `request_timeout` fails with a transport error.
    pub fn with_timeouts(
        environment: Environment,
        credentials: &Credentials,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            environment,
            auth_header: credentials.basic_auth_header(),
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Attaches the headers every request carries.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, &self.auth_header)
            .header(USER_AGENT_HEADER, USER_AGENT)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_bytes(&self, endpoint: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        let response = self.authorized(self.client.get(&url)).send().await?;

        let response = Self::handle_response_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn post_multipart(&self, endpoint: &str, form: Form) -> Result<Vec<u8>, ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("POST {}", url);
        let response = self
            .authorized(self.client.post(&url))
            .multipart(form)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait::async_trait]
impl EquipmentApi for ApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let body = self.get_bytes(UPLOAD_ENDPOINT).await?;
        parse_history(&body)
    }

    async fn upload(&self, file: &SelectedFile) -> Result<UploadSummary, ApiError> {
        let contents = file.read_bytes().await?;
        log::debug!("Uploading {} ({} bytes)", file.path().display(), contents.len());
        let part = Part::bytes(contents)
            .file_name(file.file_name().to_string())
            .mime_str("text/csv")?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let body = self.post_multipart(UPLOAD_ENDPOINT, form).await?;
        parse_summary(&body)
    }

    async fn export_pdf(&self) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(EXPORT_PDF_ENDPOINT).await
    }
}
