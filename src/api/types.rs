//! Typed entities returned by the analysis service.
//!
//! Wire JSON is deserialized into private `Wire*` structs and then checked
//! before it becomes an [`UploadSummary`] or [`HistoryEntry`].

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("count for category '{category}' is not a non-negative integer: {value}")]
    InvalidCount { category: String, value: String },

    #[error("average '{0}' is not a finite number")]
    NonFiniteAverage(&'static str),
}

/// Number of records of one equipment type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Column averages computed by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Averages {
    pub temp: f64,
    pub pressure: Option<f64>,
    pub flowrate: Option<f64>,
}

/// Aggregate statistics for one uploaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSummary {
    pub total_count: u64,
    /// Category counts in the order the service sent them.
    pub distribution: Vec<CategoryCount>,
    pub averages: Averages,
}

/// A past upload as recorded by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: String,
    pub file_name: String,
    pub uploaded_at: String,
    pub results: UploadSummary,
}

#[derive(Deserialize)]
struct WireAverages {
    temp: f64,
    #[serde(default)]
    pressure: Option<f64>,
    #[serde(default)]
    flowrate: Option<f64>,
}

#[derive(Deserialize)]
struct WireUploadSummary {
    total_count: u64,
    distribution: Map<String, Value>,
    averages: WireAverages,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
struct WireHistoryEntry {
    id: WireId,
    file_name: String,
    uploaded_at: String,
    results: WireUploadSummary,
}

fn finite(name: &'static str, value: f64) -> Result<f64, SchemaError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SchemaError::NonFiniteAverage(name))
    }
}

impl TryFrom<WireUploadSummary> for UploadSummary {
    type Error = SchemaError;

    fn try_from(wire: WireUploadSummary) -> Result<Self, Self::Error> {
        let distribution = wire
            .distribution
            .into_iter()
            .map(|(category, value)| match value.as_u64() {
                Some(count) => Ok(CategoryCount { category, count }),
                None => Err(SchemaError::InvalidCount {
                    category,
                    value: value.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let averages = Averages {
            temp: finite("temp", wire.averages.temp)?,
            pressure: wire
                .averages
                .pressure
                .map(|v| finite("pressure", v))
                .transpose()?,
            flowrate: wire
                .averages
                .flowrate
                .map(|v| finite("flowrate", v))
                .transpose()?,
        };

        Ok(UploadSummary {
            total_count: wire.total_count,
            distribution,
            averages,
        })
    }
}

impl TryFrom<WireHistoryEntry> for HistoryEntry {
    type Error = SchemaError;

    fn try_from(wire: WireHistoryEntry) -> Result<Self, Self::Error> {
        let id = match wire.id {
            WireId::Number(n) => n.to_string(),
            WireId::Text(s) => s,
        };
        Ok(HistoryEntry {
            id,
            file_name: wire.file_name,
            uploaded_at: wire.uploaded_at,
            results: UploadSummary::try_from(wire.results)?,
        })
    }
}

/// Decodes and validates an upload response body.
pub fn parse_summary(bytes: &[u8]) -> Result<UploadSummary, super::ApiError> {
    let wire: WireUploadSummary = serde_json::from_slice(bytes)?;
    Ok(UploadSummary::try_from(wire)?)
}

/// Decodes and validates a history response body, preserving server order.
pub fn parse_history(bytes: &[u8]) -> Result<Vec<HistoryEntry>, super::ApiError> {
    let wire: Vec<WireHistoryEntry> = serde_json::from_slice(bytes)?;
    let entries = wire
        .into_iter()
        .map(HistoryEntry::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}
