use crate::api::types::{HistoryEntry, UploadSummary};
use crate::environment::Environment;
use crate::selection::SelectedFile;

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;
pub use error::ApiError;
pub mod types;

#[cfg(test)]
pub(crate) mod fake_service;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait EquipmentApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Lists past uploads, most recent first as ordered by the service.
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ApiError>;

    /// Uploads a CSV for analysis and returns the computed summary.
    async fn upload(&self, file: &SelectedFile) -> Result<UploadSummary, ApiError>;

    /// Downloads the PDF report for the most recent upload.
    async fn export_pdf(&self) -> Result<Vec<u8>, ApiError>;
}
