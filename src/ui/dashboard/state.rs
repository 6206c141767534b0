//! Dashboard state management
//!
//! The dashboard state is a plain record. Every operation is a transition
//! that consumes the current state and returns the next one, so the UI loop
//! is the only place state is replaced.

use crate::api::ApiError;
use crate::api::types::{HistoryEntry, UploadSummary};
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::consts::cli_consts::alerts::{NO_FILE_SELECTED, REPORT_FAILED, UPLOAD_FAILED};
use crate::environment::Environment;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use crate::selection::SelectedFile;

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

/// Colour scheme of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
pub enum Theme {
    #[default]
    #[strum(to_string = "light")]
    Light,
    #[strum(to_string = "dark")]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label of the header action that switches away from this theme.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Switch to Dark Mode",
            Theme::Dark => "Switch to Light Mode",
        }
    }
}

/// Upload lifecycle: `Idle -> Uploading -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Uploading { generation: u64 },
}

/// What an upload task needs to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub generation: u64,
    pub file: SelectedFile,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The service the dashboard is connected to.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Whether to fill the background with the theme colour
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,

    selected_file: Option<SelectedFile>,
    summary: Option<UploadSummary>,
    history: Vec<HistoryEntry>,
    upload: UploadPhase,
    theme: Theme,
    /// Blocking alert awaiting dismissal
    alert: Option<String>,
    last_report: Option<PathBuf>,
    activity_logs: VecDeque<Event>,

    /// Source of request generations; strictly increasing.
    next_generation: u64,
    /// Latest history request issued and not yet answered.
    history_pending: Option<u64>,
    /// Latest report request issued and not yet answered.
    report_pending: Option<u64>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Environment::default(), Instant::now(), true)
    }
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(environment: Environment, start_time: Instant, with_background_color: bool) -> Self {
        Self {
            environment,
            start_time,
            with_background_color,
            tick: 0,
            selected_file: None,
            summary: None,
            history: Vec::new(),
            upload: UploadPhase::Idle,
            theme: Theme::default(),
            alert: None,
            last_report: None,
            activity_logs: VecDeque::new(),
            next_generation: 0,
            history_pending: None,
            report_pending: None,
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn summary(&self) -> Option<&UploadSummary> {
        self.summary.as_ref()
    }

    /// The full list last returned by the service.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The busy flag: true while an upload is in flight.
    pub fn is_uploading(&self) -> bool {
        matches!(self.upload, UploadPhase::Uploading { .. })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn last_report(&self) -> Option<&PathBuf> {
        self.last_report.as_ref()
    }

    pub fn is_history_loading(&self) -> bool {
        self.history_pending.is_some()
    }

    pub fn is_report_pending(&self) -> bool {
        self.report_pending.is_some()
    }

    pub fn activity_logs(&self) -> &VecDeque<Event> {
        &self.activity_logs
    }

    /// Add an event to activity logs with size limit
    #[must_use]
    pub fn log(mut self, event: Event) -> Self {
        event.emit();
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
        self
    }

    fn issue_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    fn log_failure(
        self,
        event: fn(String, EventType, LogLevel) -> Event,
        what: &str,
        error: &ApiError,
    ) -> Self {
        let level = ErrorClassifier::new().classify(error);
        self.log(event(format!("{}: {}", what, error), EventType::Error, level))
    }

    #[must_use]
    pub fn next_tick(mut self) -> Self {
        self.tick = self.tick.wrapping_add(1);
        self
    }

    #[must_use]
    pub fn select_file(mut self, file: SelectedFile) -> Self {
        let msg = format!("Selected {}", file.file_name());
        self.selected_file = Some(file);
        self.log(Event::upload(msg, EventType::Refresh, LogLevel::Info))
    }

    #[must_use]
    pub fn show_alert(mut self, message: impl Into<String>) -> Self {
        self.alert = Some(message.into());
        self
    }

    #[must_use]
    pub fn dismiss_alert(mut self) -> Self {
        self.alert = None;
        self
    }

    #[must_use]
    pub fn toggle_theme(mut self) -> Self {
        self.theme = self.theme.toggled();
        self
    }

    /// Starts a history request. Any earlier request still pending is superseded.
    #[must_use]
    pub fn begin_history_fetch(mut self) -> (Self, u64) {
        let generation = self.issue_generation();
        self.history_pending = Some(generation);
        let state = self.log(Event::history(
            "Refreshing upload history...".to_string(),
            EventType::Refresh,
            LogLevel::Debug,
        ));
        (state, generation)
    }

    /// Applies a history response. Only the newest request may replace the history;
    /// a failure keeps the previous list.
    #[must_use]
    pub fn finish_history_fetch(
        mut self,
        generation: u64,
        result: Result<Vec<HistoryEntry>, ApiError>,
    ) -> Self {
        if self.history_pending != Some(generation) {
            return self.log(Event::history(
                format!("Discarded stale history response #{}", generation),
                EventType::Cancelled,
                LogLevel::Debug,
            ));
        }
        self.history_pending = None;

        match result {
            Ok(entries) => {
                let msg = format!("Loaded {} uploads", entries.len());
                self.history = entries;
                self.log(Event::history(msg, EventType::Success, LogLevel::Info))
            }
            Err(e) => self.log_failure(Event::history, "History refresh failed", &e),
        }
    }

    /// Starts an upload. Without a selected file this raises the blocking alert and
    /// returns no ticket; while an upload is already running it does nothing.
    #[must_use]
    pub fn begin_upload(mut self) -> (Self, Option<UploadTicket>) {
        if self.is_uploading() {
            return (self, None);
        }
        let Some(file) = self.selected_file.clone() else {
            return (self.show_alert(NO_FILE_SELECTED), None);
        };

        let generation = self.issue_generation();
        self.upload = UploadPhase::Uploading { generation };
        let state = self.log(Event::upload(
            format!("Uploading {}...", file.file_name()),
            EventType::Refresh,
            LogLevel::Info,
        ));
        (state, Some(UploadTicket { generation, file }))
    }

    /// Applies an upload response. Returns whether the history should be refreshed.
    #[must_use]
    pub fn finish_upload(
        mut self,
        generation: u64,
        file_name: &str,
        result: Result<UploadSummary, ApiError>,
    ) -> (Self, bool) {
        if self.upload != (UploadPhase::Uploading { generation }) {
            let state = self.log(Event::upload(
                format!("Ignored response for cancelled upload of {}", file_name),
                EventType::Cancelled,
                LogLevel::Debug,
            ));
            return (state, false);
        }
        self.upload = UploadPhase::Idle;

        match result {
            Ok(summary) => {
                let msg = format!("Analyzed {}: {} records", file_name, summary.total_count);
                self.summary = Some(summary);
                self.selected_file = None;
                (
                    self.log(Event::upload(msg, EventType::Success, LogLevel::Info)),
                    true,
                )
            }
            Err(e) => {
                let state = self
                    .log_failure(Event::upload, &format!("Upload of {} failed", file_name), &e)
                    .show_alert(UPLOAD_FAILED);
                (state, false)
            }
        }
    }

    /// Abandons the running upload, if any, and clears the busy flag.
    #[must_use]
    pub fn cancel_upload(mut self) -> Self {
        if !self.is_uploading() {
            return self;
        }
        self.upload = UploadPhase::Idle;
        self.log(Event::upload(
            "Upload cancelled".to_string(),
            EventType::Cancelled,
            LogLevel::Info,
        ))
    }

    #[must_use]
    pub fn begin_report(mut self) -> (Self, u64) {
        let generation = self.issue_generation();
        self.report_pending = Some(generation);
        let state = self.log(Event::report(
            "Generating PDF report...".to_string(),
            EventType::Refresh,
            LogLevel::Info,
        ));
        (state, generation)
    }

    #[must_use]
    pub fn finish_report(mut self, generation: u64, result: Result<PathBuf, ApiError>) -> Self {
        if self.report_pending != Some(generation) {
            return self;
        }
        self.report_pending = None;

        match result {
            Ok(path) => {
                let msg = format!("Report saved to {}", path.display());
                self.last_report = Some(path);
                self.log(Event::report(msg, EventType::Success, LogLevel::Info))
            }
            Err(e) => self
                .log_failure(Event::report, "Report export failed", &e)
                .show_alert(REPORT_FAILED),
        }
    }
}
