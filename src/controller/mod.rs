//! Dashboard controller
//!
//! Turns user actions into requests against the analysis service. Each
//! request runs as its own task; its completion comes back over a channel
//! and is applied to the state by [`Controller::handle_completion`].

mod handle;

pub use handle::RequestHandle;

use crate::api::{ApiError, EquipmentApi};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::consts::cli_consts::api::REPORT_FILE_NAME;
use crate::events::Completion;
use crate::ui::dashboard::DashboardState;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Default)]
struct InFlight {
    history: Option<RequestHandle>,
    upload: Option<RequestHandle>,
    report: Option<RequestHandle>,
}

/// Writes the report bytes under the fixed report file name.
pub async fn save_report(download_dir: &Path, pdf: &[u8]) -> Result<PathBuf, std::io::Error> {
    tokio::fs::create_dir_all(download_dir).await?;
    let path = download_dir.join(REPORT_FILE_NAME);
    tokio::fs::write(&path, pdf).await?;
    Ok(path)
}

pub struct Controller {
    api: Arc<dyn EquipmentApi>,
    completions: mpsc::Sender<Completion>,
    download_dir: PathBuf,
    in_flight: InFlight,
}

impl Controller {
    /// Creates a controller and the receiving end of its completion channel.
    pub fn new(
        api: Arc<dyn EquipmentApi>,
        download_dir: PathBuf,
    ) -> (Self, mpsc::Receiver<Completion>) {
        let (completions, receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
        let controller = Self {
            api,
            completions,
            download_dir,
            in_flight: InFlight::default(),
        };
        (controller, receiver)
    }

    /// True when no request is waiting for a completion.
    pub fn is_idle(&self) -> bool {
        self.in_flight.history.is_none()
            && self.in_flight.upload.is_none()
            && self.in_flight.report.is_none()
    }

    /// Requests the upload history, superseding any history request still running.
    pub fn fetch_history(&mut self, state: DashboardState) -> DashboardState {
        let (state, generation) = state.begin_history_fetch();
        if let Some(previous) = self.in_flight.history.take() {
            previous.cancel();
        }

        let api = self.api.clone();
        self.in_flight.history = Some(RequestHandle::spawn(
            generation,
            self.completions.clone(),
            async move {
                Completion::History {
                    generation,
                    result: api.fetch_history().await,
                }
            },
        ));
        state
    }

    /// Uploads the selected file. Without one, only the alert is raised.
    pub fn handle_file_upload(&mut self, state: DashboardState) -> DashboardState {
        let (state, ticket) = state.begin_upload();
        let Some(ticket) = ticket else {
            return state;
        };

        let api = self.api.clone();
        let generation = ticket.generation;
        self.in_flight.upload = Some(RequestHandle::spawn(
            generation,
            self.completions.clone(),
            async move {
                let result = api.upload(&ticket.file).await;
                Completion::Upload {
                    generation,
                    file_name: ticket.file.file_name().to_string(),
                    result,
                }
            },
        ));
        state
    }

    /// Abandons the running upload and clears the busy flag.
    pub fn cancel_upload(&mut self, state: DashboardState) -> DashboardState {
        if let Some(upload) = self.in_flight.upload.take() {
            upload.cancel();
        }
        state.cancel_upload()
    }

    /// Downloads the PDF report into the download directory.
    pub fn download_report(&mut self, state: DashboardState) -> DashboardState {
        let (state, generation) = state.begin_report();
        if let Some(previous) = self.in_flight.report.take() {
            previous.cancel();
        }

        let api = self.api.clone();
        let download_dir = self.download_dir.clone();
        self.in_flight.report = Some(RequestHandle::spawn(
            generation,
            self.completions.clone(),
            async move {
                let result = match api.export_pdf().await {
                    Ok(pdf) => save_report(&download_dir, &pdf).await.map_err(ApiError::from),
                    Err(e) => Err(e),
                };
                Completion::Report { generation, result }
            },
        ));
        state
    }

    /// Applies a finished request. A successful upload triggers a history refresh.
    pub fn handle_completion(
        &mut self,
        state: DashboardState,
        completion: Completion,
    ) -> DashboardState {
        match completion {
            Completion::History { generation, result } => {
                release(&mut self.in_flight.history, generation);
                state.finish_history_fetch(generation, result)
            }
            Completion::Upload {
                generation,
                file_name,
                result,
            } => {
                release(&mut self.in_flight.upload, generation);
                let (state, refresh) = state.finish_upload(generation, &file_name, result);
                if refresh {
                    self.fetch_history(state)
                } else {
                    state
                }
            }
            Completion::Report { generation, result } => {
                release(&mut self.in_flight.report, generation);
                state.finish_report(generation, result)
            }
        }
    }

    /// Applies completions until every request has finished.
    pub async fn settle(
        &mut self,
        mut state: DashboardState,
        completions: &mut mpsc::Receiver<Completion>,
    ) -> DashboardState {
        while !self.is_idle() {
            match completions.recv().await {
                Some(completion) => state = self.handle_completion(state, completion),
                None => break,
            }
        }
        state
    }

    /// Cancels every request still running.
    pub fn shutdown(&mut self) {
        for handle in [
            self.in_flight.history.take(),
            self.in_flight.upload.take(),
            self.in_flight.report.take(),
        ]
        .into_iter()
        .flatten()
        {
            handle.cancel();
        }
    }
}

fn release(slot: &mut Option<RequestHandle>, generation: u64) {
    if slot.as_ref().is_some_and(|h| h.generation() == generation) {
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake_service::FakeService;
    use crate::api::{ApiClient, MockEquipmentApi};
    use crate::auth::Credentials;
    use crate::api::types::{Averages, CategoryCount, HistoryEntry, UploadSummary};
    use crate::consts::cli_consts::alerts::{NO_FILE_SELECTED, REPORT_FAILED, UPLOAD_FAILED};
    use crate::environment::Environment;
    use crate::selection::SelectedFile;
    use std::fs;
    use std::time::Duration;
    use tempfile::{TempDir, tempdir};

    fn scenario_summary() -> UploadSummary {
        UploadSummary {
            total_count: 12,
            distribution: vec![
                CategoryCount {
                    category: "Reactor".to_string(),
                    count: 5,
                },
                CategoryCount {
                    category: "Pump".to_string(),
                    count: 7,
                },
            ],
            averages: Averages {
                temp: 72.345,
                pressure: None,
                flowrate: None,
            },
        }
    }

    fn history_entry(file_name: &str) -> HistoryEntry {
        HistoryEntry {
            id: "1".to_string(),
            file_name: file_name.to_string(),
            uploaded_at: "2024-05-06 09:10".to_string(),
            results: scenario_summary(),
        }
    }

    fn server_error() -> ApiError {
        ApiError::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
    }

    fn state_with_file(dir: &TempDir) -> DashboardState {
        let path = dir.path().join("plant.csv");
        fs::write(&path, "Type,Temperature\nReactor,80\n").unwrap();
        DashboardState::default().select_file(SelectedFile::from_path(&path).unwrap())
    }

    async fn settle(
        controller: &mut Controller,
        state: DashboardState,
        rx: &mut mpsc::Receiver<Completion>,
    ) -> DashboardState {
        tokio::time::timeout(Duration::from_secs(5), controller.settle(state, rx))
            .await
            .expect("requests did not complete")
    }

    #[tokio::test]
    /// Submitting with no file selected issues no request at all.
    async fn test_upload_without_file_makes_no_request() {
        let mut mock = MockEquipmentApi::new();
        mock.expect_upload().times(0);
        mock.expect_fetch_history().times(0);
        mock.expect_export_pdf().times(0);

        let dir = tempdir().unwrap();
        let (mut controller, _rx) = Controller::new(Arc::new(mock), dir.path().to_path_buf());
        let state = controller.handle_file_upload(DashboardState::default());

        assert!(controller.is_idle());
        assert!(!state.is_uploading());
        assert_eq!(state.alert(), Some(NO_FILE_SELECTED));
    }

    #[tokio::test]
    /// A successful upload stores the summary and then refreshes history.
    async fn test_upload_success_refreshes_history() {
        let mut mock = MockEquipmentApi::new();
        mock.expect_upload()
            .times(1)
            .returning(|_| Ok(scenario_summary()));
        mock.expect_fetch_history()
            .times(1)
            .returning(|| Ok(vec![history_entry("plant.csv")]));

        let dir = tempdir().unwrap();
        let (mut controller, mut rx) = Controller::new(Arc::new(mock), dir.path().to_path_buf());

        let state = controller.handle_file_upload(state_with_file(&dir));
        assert!(state.is_uploading());

        let state = settle(&mut controller, state, &mut rx).await;
        assert!(!state.is_uploading());
        assert_eq!(state.summary(), Some(&scenario_summary()));
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.history()[0].file_name, "plant.csv");
        assert_eq!(state.alert(), None);
    }

    #[tokio::test]
    /// A 500 from the upload endpoint shows the generic alert and keeps the old summary.
    async fn test_upload_failure_keeps_summary() {
        let mut mock = MockEquipmentApi::new();
        let mut calls = 0;
        mock.expect_upload().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(scenario_summary())
            } else {
                Err(server_error())
            }
        });
        mock.expect_fetch_history()
            .times(1)
            .returning(|| Ok(Vec::new()));

        let dir = tempdir().unwrap();
        let (mut controller, mut rx) = Controller::new(Arc::new(mock), dir.path().to_path_buf());

        let state = controller.handle_file_upload(state_with_file(&dir));
        let state = settle(&mut controller, state, &mut rx).await;
        assert_eq!(state.summary(), Some(&scenario_summary()));

        let path = dir.path().join("plant.csv");
        let state = state.select_file(SelectedFile::from_path(&path).unwrap());
        let state = controller.handle_file_upload(state);
        let state = settle(&mut controller, state, &mut rx).await;

        assert_eq!(state.alert(), Some(UPLOAD_FAILED));
        assert_eq!(state.summary(), Some(&scenario_summary()));
        assert!(!state.is_uploading());
    }

    #[tokio::test]
    /// A failed refresh is logged only and leaves the previous history in place.
    async fn test_history_failure_is_silent() {
        let mut mock = MockEquipmentApi::new();
        let mut calls = 0;
        mock.expect_fetch_history().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(vec![history_entry("batch_01.csv")])
            } else {
                Err(server_error())
            }
        });

        let dir = tempdir().unwrap();
        let (mut controller, mut rx) = Controller::new(Arc::new(mock), dir.path().to_path_buf());

        let state = controller.fetch_history(DashboardState::default());
        let state = settle(&mut controller, state, &mut rx).await;
        let state = controller.fetch_history(state);
        let state = settle(&mut controller, state, &mut rx).await;

        assert_eq!(state.history().len(), 1);
        assert_eq!(state.alert(), None);
    }

    #[tokio::test]
    /// The report lands in the download directory under its fixed name.
    async fn test_report_saved_to_download_dir() {
        let mut mock = MockEquipmentApi::new();
        mock.expect_export_pdf()
            .times(1)
            .returning(|| Ok(b"%PDF-1.4 report".to_vec()));

        let dir = tempdir().unwrap();
        let download_dir = dir.path().join("reports");
        let (mut controller, mut rx) = Controller::new(Arc::new(mock), download_dir.clone());

        let state = controller.download_report(DashboardState::default());
        let state = settle(&mut controller, state, &mut rx).await;

        let expected = download_dir.join("Equipment_Report.pdf");
        assert_eq!(state.last_report(), Some(&expected));
        assert_eq!(fs::read(&expected).unwrap(), b"%PDF-1.4 report");
    }

    #[tokio::test]
    /// A failed export shows the report alert and writes nothing.
    async fn test_report_failure_alerts() {
        let mut mock = MockEquipmentApi::new();
        mock.expect_export_pdf()
            .times(1)
            .returning(|| Err(server_error()));

        let dir = tempdir().unwrap();
        let (mut controller, mut rx) = Controller::new(Arc::new(mock), dir.path().to_path_buf());

        let state = controller.download_report(DashboardState::default());
        let state = settle(&mut controller, state, &mut rx).await;

        assert_eq!(state.alert(), Some(REPORT_FAILED));
        assert!(!dir.path().join("Equipment_Report.pdf").exists());
    }

    #[tokio::test]
    /// An upload the service never answers times out and re-enables the control.
    async fn test_hung_upload_times_out() {
        let service = FakeService::builder()
            .upload_delay(Duration::from_secs(30))
            .start()
            .await;
        let client = ApiClient::with_timeouts(
            service.environment(),
            &Credentials::new("admin", "secret"),
            Duration::from_secs(5),
            Duration::from_millis(200),
        )
        .unwrap();

        let dir = tempdir().unwrap();
        let (mut controller, mut rx) = Controller::new(Arc::new(client), dir.path().to_path_buf());

        let state = controller.handle_file_upload(state_with_file(&dir));
        assert!(state.is_uploading());

        let state = settle(&mut controller, state, &mut rx).await;
        assert!(!state.is_uploading());
        assert!(controller.is_idle());
        assert_eq!(state.alert(), Some(UPLOAD_FAILED));
    }

    /// Upload endpoint that never answers in time.
    struct StalledApi {
        environment: Environment,
    }

    #[async_trait::async_trait]
    impl EquipmentApi for StalledApi {
        fn environment(&self) -> &Environment {
            &self.environment
        }

        async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
            Ok(Vec::new())
        }

        async fn upload(&self, _file: &SelectedFile) -> Result<UploadSummary, ApiError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(scenario_summary())
        }

        async fn export_pdf(&self) -> Result<Vec<u8>, ApiError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    /// Cancelling a stalled upload re-enables the control and drops the request.
    async fn test_cancel_stalled_upload() {
        let api = StalledApi {
            environment: Environment::Local,
        };
        let dir = tempdir().unwrap();
        let (mut controller, mut rx) = Controller::new(Arc::new(api), dir.path().to_path_buf());

        let state = controller.handle_file_upload(state_with_file(&dir));
        assert!(state.is_uploading());
        assert!(!controller.is_idle());

        let state = controller.cancel_upload(state);
        assert!(!state.is_uploading());
        assert!(controller.is_idle());

        let state = settle(&mut controller, state, &mut rx).await;
        assert!(state.summary().is_none());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    /// A newer history request supersedes the one still running.
    async fn test_newer_history_request_wins() {
        let mut mock = MockEquipmentApi::new();
        mock.expect_fetch_history()
            .returning(|| Ok(vec![history_entry("latest.csv")]));

        let dir = tempdir().unwrap();
        let (mut controller, mut rx) = Controller::new(Arc::new(mock), dir.path().to_path_buf());

        let state = controller.fetch_history(DashboardState::default());
        let state = controller.fetch_history(state);
        let state = settle(&mut controller, state, &mut rx).await;

        assert_eq!(state.history().len(), 1);
        assert!(!state.is_history_loading());
    }
}
