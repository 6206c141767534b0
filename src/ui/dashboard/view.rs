//! Dashboard view model
//!
//! Everything the renderer shows, derived from [`DashboardState`] without
//! touching the terminal.

use super::state::{DashboardState, Theme};
use crate::api::types::{HistoryEntry, UploadSummary};
use crate::consts::cli_consts::{APP_TITLE, HISTORY_DISPLAY_LIMIT};
use rust_decimal::{Decimal, RoundingStrategy};

pub const REPORT_BUTTON_LABEL: &str = "Generate PDF Report";
pub const UPLOAD_BUTTON_LABEL: &str = "Upload and Analyze";
pub const UPLOAD_BUSY_LABEL: &str = "Processing...";
pub const HISTORY_HEADERS: [&str; 3] = ["File Name", "Date", "Avg Temp"];

/// Fixed-point rendering of `value`. Exact ties round away from zero.
fn to_fixed(value: f64, places: u32) -> String {
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let rounded =
                exact.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", places as usize, rounded)
        }
        None => format!("{:.*}", places as usize, value),
    }
}

/// Average temperature as shown in the results section.
pub fn format_summary_temp(temp: f64) -> String {
    format!("{}°C", to_fixed(temp, 1))
}

/// Average temperature as shown in a history row.
pub fn format_history_temp(temp: f64) -> String {
    format!("{}°C", to_fixed(temp, 2))
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub title: &'static str,
    pub report_label: &'static str,
    pub theme_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadView {
    pub selected_file: Option<String>,
    pub button_label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub total_count: String,
    pub average_temp: String,
    /// `(category, count)` in server order.
    pub bars: Vec<(String, u64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub file_name: String,
    pub uploaded_at: String,
    pub average_temp: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub theme: Theme,
    pub header: HeaderView,
    pub upload: UploadView,
    pub results: Option<ResultsView>,
    pub history_headers: [&'static str; 3],
    pub history_rows: Vec<HistoryRow>,
    pub alert: Option<String>,
}

impl ResultsView {
    pub fn from_summary(summary: &UploadSummary) -> Self {
        Self {
            total_count: summary.total_count.to_string(),
            average_temp: format_summary_temp(summary.averages.temp),
            bars: summary
                .distribution
                .iter()
                .map(|c| (c.category.clone(), c.count))
                .collect(),
        }
    }
}

impl HistoryRow {
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            file_name: entry.file_name.clone(),
            uploaded_at: entry.uploaded_at.clone(),
            average_temp: format_history_temp(entry.results.averages.temp),
        }
    }
}

impl DashboardView {
    pub fn from_state(state: &DashboardState) -> Self {
        let busy = state.is_uploading();
        Self {
            theme: state.theme(),
            header: HeaderView {
                title: APP_TITLE,
                report_label: REPORT_BUTTON_LABEL,
                theme_label: state.theme().toggle_label(),
            },
            upload: UploadView {
                selected_file: state.selected_file().map(|f| f.file_name().to_string()),
                button_label: if busy {
                    UPLOAD_BUSY_LABEL
                } else {
                    UPLOAD_BUTTON_LABEL
                },
                enabled: !busy,
            },
            results: state.summary().map(ResultsView::from_summary),
            history_headers: HISTORY_HEADERS,
            history_rows: state
                .history()
                .iter()
                .take(HISTORY_DISPLAY_LIMIT)
                .map(HistoryRow::from_entry)
                .collect(),
            alert: state.alert().map(str::to_string),
        }
    }
}
