//! Event System
//!
//! Activity-log events and the completion messages request tasks send back
//! to the UI loop.

use crate::api::ApiError;
use crate::api::types::{HistoryEntry, UploadSummary};
use crate::logging::{LOG_TARGET, LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Operation {
    /// Refreshes the upload history.
    #[strum(to_string = "history")]
    HistoryLoader,
    /// Submits a CSV for analysis.
    #[strum(to_string = "upload")]
    UploadOrchestrator,
    /// Downloads the PDF report.
    #[strum(to_string = "report")]
    ReportExporter,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub operation: Operation,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(
        operation: Operation,
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self {
            operation,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn history(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Operation::HistoryLoader, msg, event_type, log_level)
    }

    pub fn upload(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Operation::UploadOrchestrator, msg, event_type, log_level)
    }

    pub fn report(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Operation::ReportExporter, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }

    /// Forwards the event to the `log` facade.
    pub fn emit(&self) {
        log::log!(
            target: LOG_TARGET,
            log::Level::from(self.log_level),
            "[{}] {}",
            self.operation,
            self.msg
        );
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.operation, self.msg
        )
    }
}

/// Sent by a request task when its request finishes.
#[derive(Debug)]
pub enum Completion {
    History {
        generation: u64,
        result: Result<Vec<HistoryEntry>, ApiError>,
    },
    Upload {
        generation: u64,
        file_name: String,
        result: Result<UploadSummary, ApiError>,
    },
    Report {
        generation: u64,
        result: Result<PathBuf, ApiError>,
    },
}
