//! The CSV file chosen for upload.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Only .csv files can be uploaded: {0}")]
    NotCsv(String),

    #[error("No such file: {0}")]
    NotFound(String),
}

/// A local `.csv` file selected by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    path: PathBuf,
    file_name: String,
}

impl SelectedFile {
    /// Accepts an existing regular file with a `.csv` extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SelectionError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            return Err(SelectionError::NotCsv(display));
        }
        if !path.is_file() {
            return Err(SelectionError::NotFound(display));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| display.clone());

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name sent with the multipart part.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub async fn read_bytes(&self) -> Result<Vec<u8>, std::io::Error> {
        tokio::fs::read(&self.path).await
    }
}
