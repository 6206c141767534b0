//! Headless mode execution
//!
//! One-shot commands that drive the same controller as the dashboard and
//! print the outcome to stdout.

use super::{
    SessionData,
    messages::{print_session_cancelled, print_session_starting},
};
use crate::api::ApiError;
use crate::api::types::UploadSummary;
use crate::events::EventType;
use crate::selection::SelectedFile;
use crate::ui::dashboard::{DashboardState, DashboardView};
use crate::ui::dashboard::view::{HistoryRow, ResultsView};
use crate::{print_cmd_success, print_cmd_warn};
use std::error::Error;
use std::time::Instant;

/// Waits for every request to finish, or abandons them on Ctrl+C.
async fn settle(
    session: &mut SessionData,
    state: DashboardState,
) -> Result<DashboardState, Box<dyn Error>> {
    let SessionData {
        controller,
        completions,
        ..
    } = session;

    let settled = tokio::select! {
        state = controller.settle(state, completions) => Some(state),
        _ = tokio::signal::ctrl_c() => None,
    };

    match settled {
        Some(state) => Ok(state),
        None => {
            controller.shutdown();
            print_session_cancelled();
            Err(ApiError::Cancelled.into())
        }
    }
}

/// Prints the activity log and turns a raised alert into an error.
fn finish(state: &DashboardState) -> Result<(), Box<dyn Error>> {
    for event in state.activity_logs() {
        if event.should_display() {
            println!("{}", event);
        }
    }
    match state.alert() {
        Some(alert) => Err(alert.to_string().into()),
        None => Ok(()),
    }
}

fn fresh_state(session: &SessionData) -> DashboardState {
    DashboardState::new(session.environment.clone(), Instant::now(), false)
}

/// Formats the analysis block printed after an upload.
pub fn format_summary(summary: &UploadSummary) -> Vec<String> {
    let results = ResultsView::from_summary(summary);
    let mut lines = vec![
        format!("Total Count: {}", results.total_count),
        format!("Avg Temp: {}", results.average_temp),
    ];
    if let Some(pressure) = summary.averages.pressure {
        lines.push(format!("Avg Pressure: {:.2}", pressure));
    }
    if let Some(flowrate) = summary.averages.flowrate {
        lines.push(format!("Avg Flowrate: {:.2}", flowrate));
    }
    lines.push("Equipment Type Distribution:".to_string());
    for (category, count) in &results.bars {
        lines.push(format!("  {:<20} {}", category, count));
    }
    lines
}

/// Formats the history table, header first.
pub fn format_history(headers: [&str; 3], rows: &[HistoryRow]) -> Vec<String> {
    let mut lines = vec![format!("{:<32} {:<20} {:>10}", headers[0], headers[1], headers[2])];
    lines.extend(rows.iter().map(|row| {
        format!("{:<32} {:<20} {:>10}", row.file_name, row.uploaded_at, row.average_temp)
    }));
    lines
}

fn print_history(state: &DashboardState) {
    let view = DashboardView::from_state(state);
    if view.history_rows.is_empty() {
        print_cmd_warn!("No uploads yet", "");
    }
    for line in format_history(view.history_headers, &view.history_rows) {
        println!("{}", line);
    }
}

/// Uploads `file`, then prints its analysis and the refreshed history.
pub async fn run_upload(
    mut session: SessionData,
    file: SelectedFile,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("upload", &session.environment, &session.username);

    let state = fresh_state(&session).select_file(file);
    let state = session.controller.handle_file_upload(state);
    let state = settle(&mut session, state).await?;
    finish(&state)?;

    if let Some(summary) = state.summary() {
        print_cmd_success!("Analysis complete", "");
        for line in format_summary(summary) {
            println!("  {}", line);
        }
    }
    print_history(&state);
    Ok(())
}

/// Prints the most recent uploads.
pub async fn run_history(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("history", &session.environment, &session.username);

    let state = session.controller.fetch_history(fresh_state(&session));
    let state = settle(&mut session, state).await?;
    finish(&state)?;

    // A failed refresh has no alert; report it through the exit status here.
    if let Some(last) = state.activity_logs().back() {
        if last.event_type == EventType::Error {
            return Err(last.msg.clone().into());
        }
    }
    print_history(&state);
    Ok(())
}

/// Downloads the PDF report into the session's download directory.
pub async fn run_export(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("export", &session.environment, &session.username);

    let state = session.controller.download_report(fresh_state(&session));
    let state = settle(&mut session, state).await?;
    finish(&state)?;

    if let Some(path) = state.last_report() {
        print_cmd_success!("Report saved", "{}", path.display());
    }
    Ok(())
}
